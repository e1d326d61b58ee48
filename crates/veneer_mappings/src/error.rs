//! Error types for mapping-table loading.

use std::path::PathBuf;

use veneer_common::Namespace;

/// Errors that can occur while extracting or loading the mapping table.
///
/// All of these are fatal to the run: the manifest builder and the remap
/// stage cannot operate on a partial table.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// An I/O error while reading the bundle or table.
    #[error("mapping I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The bundle archive is unreadable or lacks the table entry.
    #[error("malformed mapping bundle {path}: {reason}")]
    Bundle {
        /// The bundle path.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// The table header line is missing or does not declare all namespaces.
    #[error("malformed mapping header: {reason}")]
    Header {
        /// Description of the problem.
        reason: String,
    },

    /// A table row could not be parsed.
    #[error("malformed mapping record at line {line}: {reason}")]
    Record {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A record lacks its name in one of the three required namespaces.
    #[error("mapping record at line {line} is missing its {namespace} name")]
    MissingNamespace {
        /// 1-based line number.
        line: usize,
        /// The absent namespace.
        namespace: Namespace,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_display() {
        let err = MappingError::Record {
            line: 12,
            reason: "expected 4 columns, found 2".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 12"));
        assert!(msg.contains("expected 4 columns"));
    }

    #[test]
    fn missing_namespace_display() {
        let err = MappingError::MissingNamespace {
            line: 3,
            namespace: Namespace::Intermediate,
        };
        assert!(err.to_string().contains("intermediate"));
    }
}
