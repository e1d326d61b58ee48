//! Error types for manifest building and persistence.

use std::path::PathBuf;

/// Errors that can occur while building or persisting manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The abstraction engine produced a class unknown to the mapping
    /// table. This is an integrity violation, not a soft miss: every
    /// manifest entry must resolve across all three namespaces.
    #[error("abstracted class '{class}' has no mapping-table entry")]
    Unresolved {
        /// The named-namespace class that failed to resolve.
        class: String,
    },

    /// An abstraction-manifest entry carries an empty API class name.
    #[error("abstracted class '{class}' has an empty API class name")]
    EmptyApiClass {
        /// The named-namespace class with the empty value.
        class: String,
    },

    /// An I/O error while persisting a manifest.
    #[error("manifest I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A manifest could not be serialized.
    #[error("manifest serialization error: {reason}")]
    Serialization {
        /// Description of the failure.
        reason: String,
    },
}
