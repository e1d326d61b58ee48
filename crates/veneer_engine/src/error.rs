//! Error types for external engine invocations.

use std::path::PathBuf;

/// Errors reported by the external engines or their invocation plumbing.
///
/// Any engine failure is fatal to the run; partial engine output must not
/// be treated as usable.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine command could not be started.
    #[error("failed to launch {tool}: {reason}")]
    Launch {
        /// The configured tool command.
        tool: String,
        /// Description of the launch failure.
        reason: String,
    },

    /// The engine ran but reported an internal error.
    #[error("{tool} failed with status {status}: {stderr}")]
    Failed {
        /// The configured tool command.
        tool: String,
        /// The process exit status.
        status: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// An I/O error while preparing engine inputs or reading outputs.
    #[error("engine I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The abstraction engine's emitted manifest could not be parsed.
    #[error("malformed abstraction manifest {path}: {reason}")]
    Manifest {
        /// The manifest path.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_display_includes_stderr() {
        let err = EngineError::Failed {
            tool: "ns-remap".to_string(),
            status: 2,
            stderr: "unresolved reference core/world/World".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ns-remap"));
        assert!(msg.contains("status 2"));
        assert!(msg.contains("unresolved reference"));
    }

    #[test]
    fn launch_display() {
        let err = EngineError::Launch {
            tool: "dist-merge".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("failed to launch dist-merge"));
    }
}
