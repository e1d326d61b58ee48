//! `veneer clean` — remove pipeline working trees.

use crate::assemble::{load_project, resolve};
use crate::{CleanArgs, GlobalArgs};

/// Runs the `veneer clean` command.
///
/// Removes the configured coordinate's working tree, or the whole working
/// directory with `--all`. Returns exit code 0 on success.
pub fn run(args: &CleanArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (project_dir, config) = load_project(global)?;
    let work_dir = resolve(&project_dir, &config.output.work_dir);

    let target = if args.all {
        work_dir
    } else {
        work_dir.join(config.coordinate.slug())
    };

    if target.exists() {
        std::fs::remove_dir_all(&target)?;
        if !global.quiet {
            eprintln!("   Removed {}", target.display());
        }
    } else if !global.quiet {
        eprintln!("   Nothing to clean at {}", target.display());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[coordinate]
distribution_version = "1.16.4"
mappings_build = 7
api_build = 3

[remote]
version_index_url = "https://dist.example/index.json"
mappings_bundle_url = "https://maps.example/{version}/b{build}.tar.gz"

[tools]
merge = "dist-merge"
remap = "ns-remap"
abstract = "abstractor"
verify = "class-verify"
"#;

    fn global_for(dir: &tempfile::TempDir) -> GlobalArgs {
        let path = dir.path().join("veneer.toml");
        std::fs::write(&path, CONFIG).unwrap();
        GlobalArgs {
            quiet: true,
            config: Some(path.to_string_lossy().into_owned()),
        }
    }

    #[test]
    fn clean_removes_only_the_coordinate_tree() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("build/veneer");
        std::fs::create_dir_all(work.join("1.16.4-m7-a3/dist")).unwrap();
        std::fs::create_dir_all(work.join("1.16.5-m8-a1")).unwrap();

        let code = run(&CleanArgs { all: false }, &global_for(&dir)).unwrap();
        assert_eq!(code, 0);
        assert!(!work.join("1.16.4-m7-a3").exists());
        assert!(work.join("1.16.5-m8-a1").exists());
    }

    #[test]
    fn clean_all_removes_the_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("build/veneer");
        std::fs::create_dir_all(work.join("1.16.4-m7-a3")).unwrap();
        std::fs::create_dir_all(work.join("1.16.5-m8-a1")).unwrap();

        run(&CleanArgs { all: true }, &global_for(&dir)).unwrap();
        assert!(!work.exists());
    }

    #[test]
    fn clean_with_nothing_to_remove_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let code = run(&CleanArgs { all: false }, &global_for(&dir)).unwrap();
        assert_eq!(code, 0);
    }
}
