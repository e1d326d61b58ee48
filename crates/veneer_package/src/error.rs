//! Error types for archiving and staging.

use std::path::PathBuf;

/// Errors that can occur while packaging pipeline outputs.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    /// The source tree or file to package does not exist.
    #[error("packaging source missing: {path}")]
    MissingSource {
        /// The absent path.
        path: PathBuf,
    },

    /// An I/O error while reading, copying, or writing.
    #[error("packaging I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl PackageError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        PackageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
