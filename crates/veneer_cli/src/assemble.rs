//! `veneer assemble` — run the full assembly pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use veneer_config::VeneerConfig;
use veneer_engine::{CommandAbstractor, CommandMerger, CommandRemapper, CommandVerifier};
use veneer_fetch::{Fetcher, HttpTransport};
use veneer_pipeline::{Assembly, Engines, RunPaths};

use crate::GlobalArgs;

/// Runs the `veneer assemble` command.
///
/// Loads the project configuration, wires the production transport and
/// engine commands, and drives the pipeline. Returns exit code 0 on
/// success, 1 on error.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let (project_dir, config) = load_project(global)?;

    if !global.quiet {
        eprintln!(
            "   Assembling {} (mappings b{}, api b{})",
            config.coordinate.distribution_version,
            config.coordinate.mappings_build,
            config.coordinate.api_build
        );
    }

    let fetcher = Fetcher::new(Arc::new(HttpTransport::new()?));

    let work_dir = resolve(&project_dir, &config.output.work_dir);
    let paths = RunPaths::new(&work_dir, &config.coordinate);

    let merger = CommandMerger::new(&config.tools.merge);
    let remapper = CommandRemapper::new(&config.tools.remap);
    let abstractor = CommandAbstractor::new(&config.tools.abstractor, &paths.engine_scratch);
    let verifier = CommandVerifier::new(&config.tools.verify);

    let assembly = Assembly::new(
        &config,
        &project_dir,
        &fetcher,
        Engines {
            merger: &merger,
            remapper: &remapper,
            abstractor: &abstractor,
            verifier: &verifier,
        },
    );
    assembly.run(&mut |stage| {
        if !global.quiet {
            eprintln!("   Stage {stage}");
        }
    })?;

    if !global.quiet {
        eprintln!("   Assembled {}", config.coordinate.slug());
    }
    Ok(0)
}

/// Loads the project configuration and the directory it is rooted in.
///
/// `--config` points at a `veneer.toml` whose parent directory becomes the
/// project root; otherwise the current directory is used.
pub(crate) fn load_project(
    global: &GlobalArgs,
) -> Result<(PathBuf, VeneerConfig), Box<dyn std::error::Error>> {
    match &global.config {
        Some(configured) => {
            let path = Path::new(configured);
            let content = std::fs::read_to_string(path)?;
            let config = veneer_config::load_config_from_str(&content)?;
            let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            Ok((dir, config))
        }
        None => {
            let dir = std::env::current_dir()?;
            let config = veneer_config::load_config(&dir)?;
            Ok((dir, config))
        }
    }
}

/// Resolves a configured location against the project directory.
pub(crate) fn resolve(project_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}
