//! Error types for artifact acquisition.

use std::path::PathBuf;

/// Errors that can occur while acquiring remote artifacts.
///
/// All fetch errors are fatal to the current run; the fetcher performs no
/// internal retries. A rerun is cheap because unchanged artifacts are
/// skipped by the freshness check.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The transfer itself failed (connection, timeout, protocol).
    #[error("transfer failed for {url}: {reason}")]
    Transfer {
        /// The URL being fetched.
        url: String,
        /// Description of the transport failure.
        reason: String,
    },

    /// The remote answered with a non-success status.
    #[error("unexpected status {status} for {url}")]
    Status {
        /// The URL being fetched.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// An I/O error occurred while writing the local copy or its sidecar.
    #[error("fetch I/O error at {path}: {source}")]
    Io {
        /// The local path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A version index or metadata document could not be parsed.
    #[error("malformed version document {path}: {reason}")]
    MalformedIndex {
        /// The local path of the document.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// The pinned distribution version does not appear in the index.
    #[error("distribution version '{version}' not found in the version index")]
    VersionNotFound {
        /// The requested version.
        version: String,
    },
}
