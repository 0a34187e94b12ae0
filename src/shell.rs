//! Shell command execution.
//!
//! The resolution engine itself never runs commands; the few discovery
//! helpers that do (`toolchain`) go through the [`CommandRunner`] capability
//! so tests can substitute canned output.

use crate::error::{PsxeError, Result};
use std::process::Command;

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Capability for running a shell command and capturing its output.
pub trait CommandRunner {
    /// Run `command` through the shell, capturing stdout and stderr.
    ///
    /// A command that runs but exits non-zero is an `Ok` result with
    /// `success == false`; only failure to spawn is an error.
    fn run(&self, command: &str) -> Result<CommandOutput>;
}

/// Runner backed by the system shell.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .map_err(|_| PsxeError::CommandFailed {
                command: command.to_string(),
                code: None,
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_on_success() {
        let result = SystemRunner.run("echo resolved").unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("resolved"));
    }

    #[test]
    fn nonzero_exit_is_ok_with_failure_flag() {
        let result = SystemRunner.run("exit 3").unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn captures_stderr() {
        let result = SystemRunner.run("echo oops >&2").unwrap();
        assert!(result.stderr.contains("oops"));
    }
}
