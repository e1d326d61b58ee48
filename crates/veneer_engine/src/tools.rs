//! Production engine implementations invoking configured commands.
//!
//! Command contracts (arguments appended to the configured command):
//!
//! - merge:    `--client <path> --server <path> --output <path>`
//! - remap:    `--mappings <view> --input <path> --output <dir>
//!              --classpath <p:p:...>`
//! - abstract: `--input <dir> --output <dir> --manifest <json>
//!              --version-package <pkg> --exposed-rules <path>
//!              --base-class-rules <path> --interface-members <path>
//!              --interface-bases <path> --classpath <p:p:...>
//!              [--public-api-only] [--emit-sources]`
//! - verify:   `--classes <dir> --classpath <p:p:...>`

use std::path::{Path, PathBuf};

use veneer_policy::SelectionPolicy;

use crate::command::{classpath_arg, ToolCommand};
use crate::error::EngineError;
use crate::manifest::{load_manifest, AbstractionConfig, AbstractionManifest};
use crate::traits::{Abstractor, ClassVerifier, Merger, Remapper};

/// Production merge engine.
pub struct CommandMerger {
    command: ToolCommand,
}

impl CommandMerger {
    /// Wraps the configured merge command.
    pub fn new(command: &str) -> Self {
        Self {
            command: ToolCommand::parse(command),
        }
    }
}

impl Merger for CommandMerger {
    fn merge(&self, client: &Path, server: &Path, dest: &Path) -> Result<(), EngineError> {
        self.command.run([
            "--client".as_ref(),
            client.as_os_str(),
            "--server".as_ref(),
            server.as_os_str(),
            "--output".as_ref(),
            dest.as_os_str(),
        ])
    }
}

/// Production remapping engine.
pub struct CommandRemapper {
    command: ToolCommand,
}

impl CommandRemapper {
    /// Wraps the configured remap command.
    pub fn new(command: &str) -> Self {
        Self {
            command: ToolCommand::parse(command),
        }
    }
}

impl Remapper for CommandRemapper {
    fn remap(
        &self,
        input: &Path,
        dest: &Path,
        mapping_view: &Path,
        classpath: &[PathBuf],
    ) -> Result<(), EngineError> {
        let classpath = classpath_arg(classpath);
        self.command.run([
            "--mappings".as_ref(),
            mapping_view.as_os_str(),
            "--input".as_ref(),
            input.as_os_str(),
            "--output".as_ref(),
            dest.as_os_str(),
            "--classpath".as_ref(),
            classpath.as_ref(),
        ])
    }
}

/// Production abstraction engine.
///
/// Stages the policy's rule documents into a scratch directory so the
/// engine receives them verbatim, and parses the manifest JSON the engine
/// emits.
pub struct CommandAbstractor {
    command: ToolCommand,
    scratch_dir: PathBuf,
}

impl CommandAbstractor {
    /// Wraps the configured abstraction command with a scratch directory
    /// for staged policy files and the emitted manifest.
    pub fn new(command: &str, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: ToolCommand::parse(command),
            scratch_dir: scratch_dir.into(),
        }
    }

    fn stage_policy(&self, policy: &SelectionPolicy) -> Result<[PathBuf; 4], EngineError> {
        std::fs::create_dir_all(&self.scratch_dir).map_err(|e| EngineError::Io {
            path: self.scratch_dir.clone(),
            source: e,
        })?;
        let files = [
            ("exposed.rules", &policy.sources.exposed_rules),
            ("baseclasses.rules", &policy.sources.base_class_rules),
            ("interface-members.relations", &policy.sources.interface_members),
            ("interface-bases.relations", &policy.sources.interface_bases),
        ];
        let mut paths: [PathBuf; 4] = Default::default();
        for (slot, (name, content)) in paths.iter_mut().zip(files) {
            let path = self.scratch_dir.join(name);
            std::fs::write(&path, content).map_err(|e| EngineError::Io {
                path: path.clone(),
                source: e,
            })?;
            *slot = path;
        }
        Ok(paths)
    }
}

impl Abstractor for CommandAbstractor {
    fn abstract_classes(
        &self,
        source: &Path,
        dest: &Path,
        classpath: &[PathBuf],
        policy: &SelectionPolicy,
        config: &AbstractionConfig,
    ) -> Result<AbstractionManifest, EngineError> {
        let [exposed, bases, members, ibases] = self.stage_policy(policy)?;
        let manifest_path = self.scratch_dir.join("abstraction-manifest.json");
        let classpath = classpath_arg(classpath);

        let mut args: Vec<&std::ffi::OsStr> = vec![
            "--input".as_ref(),
            source.as_os_str(),
            "--output".as_ref(),
            dest.as_os_str(),
            "--manifest".as_ref(),
            manifest_path.as_os_str(),
            "--version-package".as_ref(),
            config.version_package.as_ref(),
            "--exposed-rules".as_ref(),
            exposed.as_os_str(),
            "--base-class-rules".as_ref(),
            bases.as_os_str(),
            "--interface-members".as_ref(),
            members.as_os_str(),
            "--interface-bases".as_ref(),
            ibases.as_os_str(),
            "--classpath".as_ref(),
            classpath.as_ref(),
        ];
        if config.fit_to_public_api {
            args.push("--public-api-only".as_ref());
        }
        if !config.raw_output {
            args.push("--emit-sources".as_ref());
        }

        self.command.run(args)?;
        load_manifest(&manifest_path)
    }
}

/// Production structural verifier.
pub struct CommandVerifier {
    command: ToolCommand,
}

impl CommandVerifier {
    /// Wraps the configured verify command.
    pub fn new(command: &str) -> Self {
        Self {
            command: ToolCommand::parse(command),
        }
    }
}

impl ClassVerifier for CommandVerifier {
    fn verify(&self, classes_dir: &Path, classpath: &[PathBuf]) -> Result<(), EngineError> {
        let classpath = classpath_arg(classpath);
        self.command.run([
            "--classes".as_ref(),
            classes_dir.as_os_str(),
            "--classpath".as_ref(),
            classpath.as_ref(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SelectionPolicy {
        SelectionPolicy::from_strs("core/world/**\n", "", "api/Tickable=tick\n", "").unwrap()
    }

    #[test]
    fn merger_failure_is_engine_failure() {
        let dir = tempfile::tempdir().unwrap();
        let merger = CommandMerger::new("false");
        let err = merger
            .merge(
                &dir.path().join("client.bin"),
                &dir.path().join("server.bin"),
                &dir.path().join("merged.bin"),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Failed { .. }));
    }

    #[test]
    fn remapper_success_with_noop_command() {
        let dir = tempfile::tempdir().unwrap();
        let remapper = CommandRemapper::new("true");
        remapper
            .remap(
                &dir.path().join("merged"),
                &dir.path().join("named"),
                &dir.path().join("view"),
                &[dir.path().join("lib.bin")],
            )
            .unwrap();
    }

    #[test]
    fn abstractor_stages_policy_files() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        let abstractor = CommandAbstractor::new("true", &scratch);
        // The no-op engine emits no manifest, so the call fails at the
        // manifest-read step; the staged policy files must still exist.
        let err = abstractor
            .abstract_classes(
                &dir.path().join("named"),
                &dir.path().join("impl"),
                &[],
                &policy(),
                &AbstractionConfig::base("v1_16_4"),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
        assert_eq!(
            std::fs::read_to_string(scratch.join("exposed.rules")).unwrap(),
            "core/world/**\n"
        );
        assert!(scratch.join("interface-members.relations").exists());
    }

    #[test]
    fn verifier_unlaunchable_command_errors() {
        let verifier = CommandVerifier::new("definitely-not-a-real-tool-9x");
        let err = verifier.verify(Path::new("/tmp/impl"), &[]).unwrap_err();
        assert!(matches!(err, EngineError::Launch { .. }));
    }
}
