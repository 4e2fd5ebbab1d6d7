use std::process::Command;

use cvs_core::CommandInvocation;
use tracing::{debug, trace, warn};

use crate::{ExecError, TextEncoding};

/// Runs one invocation to completion and returns its decoded stdout.
pub trait CommandExecutor: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] if the process cannot be started and
    /// [`ExecError::Failed`] if it exits unsuccessfully.
    fn execute(&self, invocation: &CommandInvocation) -> Result<String, ExecError>;
}

/// Spawns the program directly, without a shell, in the invocation's working
/// directory.
///
/// There is no timeout: a client waiting on a password prompt blocks the
/// caller until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
    encoding: TextEncoding,
}

impl ProcessExecutor {
    #[must_use]
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, invocation: &CommandInvocation) -> Result<String, ExecError> {
        let command_line = invocation.command_line();
        debug!(
            command = %command_line,
            cwd = invocation.working_directory().unwrap_or("."),
            "executing command"
        );

        let mut command = Command::new(invocation.program());
        command.args(invocation.arguments());
        if let Some(dir) = invocation.working_directory() {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| ExecError::Spawn {
            program: invocation.program().to_string(),
            source,
        })?;

        let stdout = self.encoding.decode(&output.stdout);
        let stderr = self.encoding.decode(&output.stderr);

        if !stdout.is_empty() {
            trace!(command = %command_line, %stdout, "command stdout");
        }
        if !stderr.is_empty() {
            debug!(command = %command_line, %stderr, "command stderr");
        }

        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = stderr.trim();
        let message = if stderr.is_empty() {
            format!("{} exited with {}", invocation.program(), output.status)
        } else {
            stderr.to_string()
        };
        warn!(command = %command_line, status = %output.status, "command failed");

        Err(ExecError::Failed {
            command: command_line,
            code: output.status.code(),
            message,
        })
    }
}
