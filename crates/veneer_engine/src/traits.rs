//! The four collaborator interfaces.

use std::path::{Path, PathBuf};

use veneer_policy::SelectionPolicy;

use crate::error::EngineError;
use crate::manifest::{AbstractionConfig, AbstractionManifest};

/// Combines the client and server binary archives into one merged archive.
pub trait Merger {
    /// Merges `client` and `server` into `dest`.
    fn merge(&self, client: &Path, server: &Path, dest: &Path) -> Result<(), EngineError>;
}

/// Translates compiled classes from one namespace to another.
///
/// The engine consumes a flat mapping view (derived from the mapping
/// table by the remap stage) and the full dependency classpath for
/// resolution context. It only handles class entries; the remap stage
/// itself copies non-class resources.
pub trait Remapper {
    /// Remaps the classes of `input` into the `dest` directory.
    fn remap(
        &self,
        input: &Path,
        dest: &Path,
        mapping_view: &Path,
        classpath: &[PathBuf],
    ) -> Result<(), EngineError>;
}

/// Derives the abstracted class set from a source tree.
///
/// A black box: inputs are classes + classpath + selection policy, output
/// is transformed classes in `dest` plus the per-class manifest. The
/// engine's choice of `api_class_name` is authoritative at this layer.
pub trait Abstractor {
    /// Runs one abstraction pass and returns the emitted manifest.
    fn abstract_classes(
        &self,
        source: &Path,
        dest: &Path,
        classpath: &[PathBuf],
        policy: &SelectionPolicy,
        config: &AbstractionConfig,
    ) -> Result<AbstractionManifest, EngineError>;
}

/// Structurally verifies that generated classes link against a classpath.
pub trait ClassVerifier {
    /// Verifies every class under `classes_dir` against `classpath`.
    fn verify(&self, classes_dir: &Path, classpath: &[PathBuf]) -> Result<(), EngineError>;
}
