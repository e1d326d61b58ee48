//! Configured tool-command invocation.

use std::ffi::OsStr;
use std::process::Command;

use crate::error::EngineError;

/// A configured external tool command.
///
/// Parsed from a whitespace-separated configuration string: the first
/// token is the program, the rest are leading arguments (no shell quoting
/// is interpreted). Engine implementations append their own arguments per
/// invocation.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    leading_args: Vec<String>,
}

impl ToolCommand {
    /// Parses a configuration command string.
    ///
    /// An empty string yields a command that fails to launch; the config
    /// loader rejects empty tool entries before this point.
    pub fn parse(command: &str) -> Self {
        let mut tokens = command.split_whitespace().map(str::to_string);
        Self {
            program: tokens.next().unwrap_or_default(),
            leading_args: tokens.collect(),
        }
    }

    /// The display form used in error messages.
    pub fn display_name(&self) -> &str {
        &self.program
    }

    /// Runs the command with appended arguments, blocking to completion.
    ///
    /// Standard error is captured and surfaced in the failure variant; a
    /// non-zero exit status is an engine failure.
    pub fn run<I, S>(&self, args: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .output()
            .map_err(|e| EngineError::Launch {
                tool: self.program.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(EngineError::Failed {
                tool: self.program.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Joins classpath entries into a single `:`-separated argument.
pub(crate) fn classpath_arg(classpath: &[std::path::PathBuf]) -> String {
    classpath
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(":")
}
