//! The per-coordinate working tree.
//!
//! Every derived path lives under `<work_dir>/<coordinate slug>/`, and the
//! slug incorporates all three coordinate fields, so runs with different
//! coordinates never share a single output location.

use std::path::{Path, PathBuf};

use veneer_config::VersionCoordinate;

/// All filesystem locations of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    /// Root of the run's working tree.
    pub run_dir: PathBuf,

    /// Advisory lockfile for the run.
    pub lock_file: PathBuf,

    /// Fetched distribution version index.
    pub version_index: PathBuf,

    /// Fetched per-version metadata document.
    pub version_metadata: PathBuf,

    /// Fetched client binary archive.
    pub client_archive: PathBuf,

    /// Fetched server binary archive.
    pub server_archive: PathBuf,

    /// Root for fetched dependency libraries.
    pub libraries_dir: PathBuf,

    /// Fetched mapping bundle.
    pub mappings_bundle: PathBuf,

    /// Mapping table extracted from the bundle.
    pub mappings_table: PathBuf,

    /// Derived official→named mapping view for the remap engine.
    pub mapping_view: PathBuf,

    /// Merged client+server archive.
    pub merged_archive: PathBuf,

    /// Named-namespace tree produced by the remap stage.
    pub named_dir: PathBuf,

    /// Scratch directory for abstraction-engine inputs and outputs.
    pub engine_scratch: PathBuf,

    /// Implementation output of the abstraction stage.
    pub impl_dir: PathBuf,

    /// Public-API binary output of the abstraction stage.
    pub api_dir: PathBuf,

    /// Public-API source output of the abstraction stage.
    pub api_sources_dir: PathBuf,

    /// Persisted abstraction manifest.
    pub abstraction_manifest: PathBuf,

    /// Persisted runtime manifest.
    pub runtime_manifest: PathBuf,

    /// Standalone archive of the abstraction manifest.
    pub abstraction_manifest_archive: PathBuf,

    /// Standalone archive of the runtime manifest.
    pub runtime_manifest_archive: PathBuf,

    /// Archive of the implementation tree.
    pub impl_archive: PathBuf,

    /// Archive of the public-API binary tree.
    pub api_archive: PathBuf,

    /// Archive of the public-API source tree.
    pub api_sources_archive: PathBuf,
}

impl RunPaths {
    /// Derives the working tree for a coordinate.
    pub fn new(work_dir: &Path, coordinate: &VersionCoordinate) -> Self {
        let run_dir = work_dir.join(coordinate.slug());
        let remote = run_dir.join("remote");
        let mappings = run_dir.join("mappings");
        let output = run_dir.join("output");
        let manifests = run_dir.join("manifests");
        let dist = run_dir.join("dist");

        Self {
            lock_file: run_dir.join(".lock"),
            version_index: remote.join("version-index.json"),
            version_metadata: remote.join("version.json"),
            client_archive: remote.join("client.bin"),
            server_archive: remote.join("server.bin"),
            libraries_dir: remote.join("libraries"),
            mappings_bundle: remote.join("mappings.tar.gz"),
            mappings_table: mappings.join(format!(
                "mappings-b{}.ntab",
                coordinate.mappings_build
            )),
            mapping_view: mappings.join("official-to-named.view"),
            merged_archive: run_dir.join("merged").join("merged.bin"),
            named_dir: run_dir.join("named"),
            engine_scratch: run_dir.join("scratch"),
            impl_dir: output.join("impl"),
            api_dir: output.join("api"),
            api_sources_dir: output.join("api-sources"),
            abstraction_manifest: manifests.join("abstraction-manifest.json"),
            runtime_manifest: manifests.join("runtime-manifest.properties"),
            abstraction_manifest_archive: dist.join("abstraction-manifest.tar.gz"),
            runtime_manifest_archive: dist.join("runtime-manifest.tar.gz"),
            impl_archive: dist.join("impl.tar.gz"),
            api_archive: dist.join("api.tar.gz"),
            api_sources_archive: dist.join("api-sources.tar.gz"),
            run_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(version: &str, mappings: u32, api: u32) -> VersionCoordinate {
        VersionCoordinate {
            distribution_version: version.to_string(),
            mappings_build: mappings,
            api_build: api,
        }
    }

    #[test]
    fn every_path_lives_under_the_run_dir() {
        let paths = RunPaths::new(Path::new("/work"), &coordinate("1.16.4", 7, 3));
        assert_eq!(paths.run_dir, Path::new("/work/1.16.4-m7-a3"));
        for path in [
            &paths.lock_file,
            &paths.version_index,
            &paths.client_archive,
            &paths.server_archive,
            &paths.libraries_dir,
            &paths.mappings_bundle,
            &paths.mappings_table,
            &paths.mapping_view,
            &paths.merged_archive,
            &paths.named_dir,
            &paths.impl_dir,
            &paths.api_dir,
            &paths.api_sources_dir,
            &paths.abstraction_manifest,
            &paths.runtime_manifest,
            &paths.impl_archive,
            &paths.api_archive,
            &paths.api_sources_archive,
        ] {
            assert!(path.starts_with(&paths.run_dir), "{path:?}");
        }
    }

    #[test]
    fn table_path_names_the_mappings_build() {
        let paths = RunPaths::new(Path::new("/work"), &coordinate("1.16.4", 7, 3));
        assert!(paths.mappings_table.ends_with("mappings-b7.ntab"));
    }

    #[test]
    fn different_coordinates_share_no_paths() {
        let work = Path::new("/work");
        let a = RunPaths::new(work, &coordinate("1.16.4", 7, 3));
        for other in [
            coordinate("1.16.5", 7, 3),
            coordinate("1.16.4", 8, 3),
            coordinate("1.16.4", 7, 4),
        ] {
            let b = RunPaths::new(work, &other);
            assert_ne!(a.run_dir, b.run_dir);
            assert!(!b.impl_archive.starts_with(&a.run_dir));
        }
    }
}
