//! Pipeline-level errors.
//!
//! Stage-specific errors bubble up unchanged; the orchestrator only adds
//! the sequencing failures it detects itself.

use std::path::PathBuf;

/// Errors aborting a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Another run holds the coordinate's advisory lock.
    #[error("another run is in progress: lock held on {path}")]
    Locked {
        /// The contested lockfile.
        path: PathBuf,
    },

    /// A declared stage input does not exist on disk.
    #[error("stage '{stage}' precondition missing: {path}")]
    Precondition {
        /// The stage whose input is absent.
        stage: &'static str,
        /// The missing path.
        path: PathBuf,
    },

    /// A stage needed an in-memory product an earlier stage never built.
    #[error("stage '{stage}' ran before the {missing} was built")]
    Sequence {
        /// The stage that observed the gap.
        stage: &'static str,
        /// The absent product.
        missing: &'static str,
    },

    /// An orchestrator-level I/O failure.
    #[error("pipeline I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Artifact acquisition failed.
    #[error(transparent)]
    Fetch(#[from] veneer_fetch::FetchError),

    /// Mapping-table loading or view derivation failed.
    #[error(transparent)]
    Mapping(#[from] veneer_mappings::MappingError),

    /// Selection-policy loading failed.
    #[error(transparent)]
    Policy(#[from] veneer_policy::PolicyError),

    /// An external engine failed.
    #[error(transparent)]
    Engine(#[from] veneer_engine::EngineError),

    /// Manifest building or persistence failed.
    #[error(transparent)]
    Manifest(#[from] veneer_manifest::ManifestError),

    /// Output packaging failed.
    #[error(transparent)]
    Package(#[from] veneer_package::PackageError),
}

impl PipelineError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
