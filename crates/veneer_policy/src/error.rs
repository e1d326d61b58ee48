//! Error types for selection-policy loading.

use std::path::PathBuf;

/// Errors that can occur while loading selection rules or relation tables.
///
/// All of these are fatal to the run; the abstraction stage must not run
/// with a partially loaded policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// An I/O error while reading a rule or relation file.
    #[error("policy I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A selector pattern could not be parsed.
    #[error("invalid selector pattern '{pattern}' at line {line}: {reason}")]
    Pattern {
        /// 1-based line number.
        line: usize,
        /// The offending pattern text.
        pattern: String,
        /// Description of the syntax problem.
        reason: String,
    },

    /// A relation line could not be parsed.
    #[error("invalid relation at line {line}: {reason}")]
    Relation {
        /// 1-based line number.
        line: usize,
        /// Description of the syntax problem.
        reason: String,
    },
}
