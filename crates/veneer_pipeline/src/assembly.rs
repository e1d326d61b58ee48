//! The full assembly run: stage construction and sequencing.

use std::path::{Path, PathBuf};

use veneer_common::Namespace;
use veneer_config::{PolicyConfig, RemoteConfig, VeneerConfig, VersionCoordinate};
use veneer_engine::{AbstractionConfig, Abstractor, ClassVerifier, Merger, Remapper};
use veneer_fetch::{ArtifactDescriptor, Fetcher, VersionIndex, VersionMetadata};
use veneer_manifest::{
    build_runtime_manifest, write_abstraction_manifest, write_runtime_manifest,
};
use veneer_mappings::{extract_table, write_mapping_view, MappingTable};
use veneer_package::{archive_dir, archive_file, stage_impl_classes};
use veneer_policy::SelectionPolicy;

use crate::error::PipelineError;
use crate::lock::RunLock;
use crate::paths::RunPaths;
use crate::resources::copy_resources;
use crate::stage::{run_stages, RunState, Stage};

/// The four external engines a run delegates binary work to.
pub struct Engines<'a> {
    /// Client+server merge engine.
    pub merger: &'a dyn Merger,

    /// Namespace remapping engine.
    pub remapper: &'a dyn Remapper,

    /// Abstraction engine.
    pub abstractor: &'a dyn Abstractor,

    /// Structural class verifier.
    pub verifier: &'a dyn ClassVerifier,
}

/// One configured assembly run.
pub struct Assembly<'a> {
    config: &'a VeneerConfig,
    project_dir: PathBuf,
    paths: RunPaths,
    fetcher: &'a Fetcher,
    engines: Engines<'a>,
}

impl<'a> Assembly<'a> {
    /// Prepares a run for the configured coordinate.
    pub fn new(
        config: &'a VeneerConfig,
        project_dir: &Path,
        fetcher: &'a Fetcher,
        engines: Engines<'a>,
    ) -> Self {
        let work_dir = resolve(project_dir, &config.output.work_dir);
        let paths = RunPaths::new(&work_dir, &config.coordinate);
        Self {
            config,
            project_dir: project_dir.to_path_buf(),
            paths,
            fetcher,
            engines,
        }
    }

    /// The run's working-tree layout.
    pub fn paths(&self) -> &RunPaths {
        &self.paths
    }

    /// Runs the whole pipeline under the coordinate's advisory lock.
    ///
    /// `progress` receives each stage name as it starts.
    pub fn run(&self, progress: &mut dyn FnMut(&'static str)) -> Result<(), PipelineError> {
        let _lock = RunLock::acquire(&self.paths.lock_file)?;

        let fetch = FetchStage {
            fetcher: self.fetcher,
            remote: &self.config.remote,
            coordinate: &self.config.coordinate,
            paths: &self.paths,
        };
        let merge = MergeStage {
            merger: self.engines.merger,
            paths: &self.paths,
        };
        let mappings = MappingsStage { paths: &self.paths };
        let remap = RemapStage {
            remapper: self.engines.remapper,
            paths: &self.paths,
        };
        let policy = PolicyStage {
            policy: &self.config.policy,
            project_dir: &self.project_dir,
        };
        let abstract_ = AbstractStage {
            abstractor: self.engines.abstractor,
            verifier: self.engines.verifier,
            coordinate: &self.config.coordinate,
            paths: &self.paths,
            classes_dir: resolve(&self.project_dir, &self.config.output.classes_dir),
        };
        let manifest = ManifestStage {
            paths: &self.paths,
            resources_dir: resolve(&self.project_dir, &self.config.output.resources_dir),
        };
        let package = PackageStage {
            coordinate: &self.config.coordinate,
            paths: &self.paths,
            classes_dir: resolve(&self.project_dir, &self.config.output.classes_dir),
            dev_api_archive: resolve(&self.project_dir, &self.config.output.dev_api_archive),
        };

        let stages: [&dyn Stage; 8] = [
            &fetch, &merge, &mappings, &remap, &policy, &abstract_, &manifest, &package,
        ];
        run_stages(&stages, &mut RunState::default(), progress)
    }
}

/// Resolves a configured location against the project directory.
fn resolve(project_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

struct FetchStage<'a> {
    fetcher: &'a Fetcher,
    remote: &'a RemoteConfig,
    coordinate: &'a VersionCoordinate,
    paths: &'a RunPaths,
}

impl Stage for FetchStage<'_> {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![
            self.paths.client_archive.clone(),
            self.paths.server_archive.clone(),
            self.paths.mappings_bundle.clone(),
        ]
    }

    fn run(&self, state: &mut RunState) -> Result<(), PipelineError> {
        self.fetcher.fetch(&ArtifactDescriptor::new(
            &self.remote.version_index_url,
            &self.paths.version_index,
        ))?;
        let index = VersionIndex::load(&self.paths.version_index)?;
        let entry = index.find(&self.coordinate.distribution_version)?;

        self.fetcher.fetch(&ArtifactDescriptor::new(
            &entry.url,
            &self.paths.version_metadata,
        ))?;
        let metadata = VersionMetadata::load(&self.paths.version_metadata)?;

        let mut descriptors = vec![
            ArtifactDescriptor::new(
                &metadata.downloads.client.url,
                &self.paths.client_archive,
            ),
            ArtifactDescriptor::new(
                &metadata.downloads.server.url,
                &self.paths.server_archive,
            ),
            ArtifactDescriptor::new(
                self.remote.mappings_bundle_url_for(self.coordinate),
                &self.paths.mappings_bundle,
            ),
        ];
        let mut libraries = Vec::with_capacity(metadata.libraries.len());
        for library in &metadata.libraries {
            let local = self.paths.libraries_dir.join(&library.path);
            descriptors.push(ArtifactDescriptor::new(&library.url, &local));
            libraries.push(local);
        }

        self.fetcher.fetch_all(&descriptors)?;
        state.library_paths = libraries;
        Ok(())
    }
}

struct MergeStage<'a> {
    merger: &'a dyn Merger,
    paths: &'a RunPaths,
}

impl Stage for MergeStage<'_> {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![
            self.paths.client_archive.clone(),
            self.paths.server_archive.clone(),
        ]
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![self.paths.merged_archive.clone()]
    }

    fn run(&self, _state: &mut RunState) -> Result<(), PipelineError> {
        if let Some(parent) = self.paths.merged_archive.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        self.merger.merge(
            &self.paths.client_archive,
            &self.paths.server_archive,
            &self.paths.merged_archive,
        )?;
        Ok(())
    }
}

struct MappingsStage<'a> {
    paths: &'a RunPaths,
}

impl Stage for MappingsStage<'_> {
    fn name(&self) -> &'static str {
        "mappings"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.paths.mappings_bundle.clone()]
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![self.paths.mappings_table.clone()]
    }

    fn run(&self, state: &mut RunState) -> Result<(), PipelineError> {
        extract_table(&self.paths.mappings_bundle, &self.paths.mappings_table)?;
        state.table = Some(MappingTable::load(&self.paths.mappings_table)?);
        Ok(())
    }
}

struct RemapStage<'a> {
    remapper: &'a dyn Remapper,
    paths: &'a RunPaths,
}

impl Stage for RemapStage<'_> {
    fn name(&self) -> &'static str {
        "remap"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.paths.merged_archive.clone()]
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![self.paths.named_dir.clone()]
    }

    fn run(&self, state: &mut RunState) -> Result<(), PipelineError> {
        let table = state.table.as_ref().ok_or(PipelineError::Sequence {
            stage: "remap",
            missing: "mapping table",
        })?;
        write_mapping_view(
            table,
            Namespace::Official,
            Namespace::Named,
            &self.paths.mapping_view,
        )?;

        std::fs::create_dir_all(&self.paths.named_dir)
            .map_err(|e| PipelineError::io(&self.paths.named_dir, e))?;
        self.remapper.remap(
            &self.paths.merged_archive,
            &self.paths.named_dir,
            &self.paths.mapping_view,
            &state.library_paths,
        )?;
        copy_resources(&self.paths.merged_archive, &self.paths.named_dir)
    }
}

struct PolicyStage<'a> {
    policy: &'a PolicyConfig,
    project_dir: &'a Path,
}

impl PolicyStage<'_> {
    fn files(&self) -> [PathBuf; 4] {
        [
            resolve(self.project_dir, &self.policy.exposed_rules),
            resolve(self.project_dir, &self.policy.base_class_rules),
            resolve(self.project_dir, &self.policy.interface_members),
            resolve(self.project_dir, &self.policy.interface_bases),
        ]
    }
}

impl Stage for PolicyStage<'_> {
    fn name(&self) -> &'static str {
        "policy"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        self.files().to_vec()
    }

    fn outputs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn run(&self, state: &mut RunState) -> Result<(), PipelineError> {
        let [exposed, bases, members, interface_bases] = self.files();
        state.policy = Some(SelectionPolicy::load(
            &exposed,
            &bases,
            &members,
            &interface_bases,
        )?);
        Ok(())
    }
}

struct AbstractStage<'a> {
    abstractor: &'a dyn Abstractor,
    verifier: &'a dyn ClassVerifier,
    coordinate: &'a VersionCoordinate,
    paths: &'a RunPaths,
    classes_dir: PathBuf,
}

impl Stage for AbstractStage<'_> {
    fn name(&self) -> &'static str {
        "abstract"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.paths.named_dir.clone()]
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![
            self.paths.impl_dir.clone(),
            self.paths.api_dir.clone(),
            self.paths.api_sources_dir.clone(),
        ]
    }

    fn run(&self, state: &mut RunState) -> Result<(), PipelineError> {
        let policy = state.policy.as_ref().ok_or(PipelineError::Sequence {
            stage: "abstract",
            missing: "selection policy",
        })?;
        for dir in self.outputs() {
            std::fs::create_dir_all(&dir).map_err(|e| PipelineError::io(&dir, e))?;
        }

        let base = AbstractionConfig::base(self.coordinate.version_package());
        let manifest = self.abstractor.abstract_classes(
            &self.paths.named_dir,
            &self.paths.impl_dir,
            &state.library_paths,
            policy,
            &base,
        )?;

        let mut verify_classpath = state.library_paths.clone();
        verify_classpath.push(self.paths.named_dir.clone());
        if self.classes_dir.exists() {
            verify_classpath.push(self.classes_dir.clone());
        }
        self.verifier
            .verify(&self.paths.impl_dir, &verify_classpath)?;

        self.abstractor.abstract_classes(
            &self.paths.named_dir,
            &self.paths.api_dir,
            &state.library_paths,
            policy,
            &base.clone().with_public_api(true),
        )?;
        self.abstractor.abstract_classes(
            &self.paths.named_dir,
            &self.paths.api_sources_dir,
            &state.library_paths,
            policy,
            &base.with_public_api(true).with_raw_output(false),
        )?;

        state.abstraction = Some(manifest);
        Ok(())
    }
}

struct ManifestStage<'a> {
    paths: &'a RunPaths,
    resources_dir: PathBuf,
}

impl Stage for ManifestStage<'_> {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![
            self.paths.abstraction_manifest.clone(),
            self.paths.runtime_manifest.clone(),
            self.paths.abstraction_manifest_archive.clone(),
            self.paths.runtime_manifest_archive.clone(),
        ]
    }

    fn run(&self, state: &mut RunState) -> Result<(), PipelineError> {
        let table = state.table.as_ref().ok_or(PipelineError::Sequence {
            stage: "manifest",
            missing: "mapping table",
        })?;
        let abstraction = state.abstraction.as_ref().ok_or(PipelineError::Sequence {
            stage: "manifest",
            missing: "abstraction manifest",
        })?;

        let runtime = build_runtime_manifest(abstraction, table)?;
        write_abstraction_manifest(abstraction, &self.paths.abstraction_manifest)?;
        write_runtime_manifest(&runtime, &self.paths.runtime_manifest)?;
        // Ships inside the consuming project's primary artifact.
        write_runtime_manifest(
            &runtime,
            &self.resources_dir.join("runtime-manifest.properties"),
        )?;

        archive_file(
            &self.paths.abstraction_manifest,
            &self.paths.abstraction_manifest_archive,
        )?;
        archive_file(
            &self.paths.runtime_manifest,
            &self.paths.runtime_manifest_archive,
        )?;
        Ok(())
    }
}

struct PackageStage<'a> {
    coordinate: &'a VersionCoordinate,
    paths: &'a RunPaths,
    classes_dir: PathBuf,
    dev_api_archive: PathBuf,
}

impl Stage for PackageStage<'_> {
    fn name(&self) -> &'static str {
        "package"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![
            self.paths.impl_dir.clone(),
            self.paths.api_dir.clone(),
            self.paths.api_sources_dir.clone(),
        ]
    }

    fn outputs(&self) -> Vec<PathBuf> {
        vec![
            self.paths.impl_archive.clone(),
            self.paths.api_archive.clone(),
            self.paths.api_sources_archive.clone(),
            self.dev_api_archive.clone(),
        ]
    }

    fn run(&self, _state: &mut RunState) -> Result<(), PipelineError> {
        archive_dir(&self.paths.impl_dir, &self.paths.impl_archive)?;
        archive_dir(&self.paths.api_dir, &self.paths.api_archive)?;
        archive_dir(&self.paths.api_sources_dir, &self.paths.api_sources_archive)?;

        stage_impl_classes(
            &self.paths.impl_dir,
            &self.classes_dir,
            &self.coordinate.version_package(),
        )?;

        if let Some(parent) = self.dev_api_archive.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        }
        std::fs::copy(&self.paths.api_archive, &self.dev_api_archive)
            .map_err(|e| PipelineError::io(&self.dev_api_archive, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_locations_resolve_against_the_project() {
        assert_eq!(
            resolve(Path::new("/project"), "build/veneer"),
            Path::new("/project/build/veneer")
        );
        assert_eq!(
            resolve(Path::new("/project"), "/abs/work"),
            Path::new("/abs/work")
        );
    }
}
