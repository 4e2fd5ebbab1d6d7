use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cvs_core::{CommandInvocation, PathProbe};

use crate::{CommandExecutor, ExecError};

type Responder = Box<dyn Fn(&CommandInvocation) -> Result<String, ExecError> + Send + Sync>;

/// Executor that answers from a closure and records every invocation.
pub(crate) struct MockExecutor {
    responder: Responder,
    calls: Mutex<Vec<CommandInvocation>>,
}

impl MockExecutor {
    pub(crate) fn new(
        responder: impl Fn(&CommandInvocation) -> Result<String, ExecError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(stdout: &str) -> Self {
        let stdout = stdout.to_string();
        Self::new(move |_| Ok(stdout.clone()))
    }

    pub(crate) fn failing(stderr: &str) -> Self {
        let stderr = stderr.to_string();
        Self::new(move |invocation| Err(failure(invocation, &stderr)))
    }

    pub(crate) fn calls(&self) -> Vec<CommandInvocation> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(CommandInvocation::command_line)
            .collect()
    }
}

pub(crate) fn failure(invocation: &CommandInvocation, stderr: &str) -> ExecError {
    ExecError::Failed {
        command: invocation.command_line(),
        code: Some(1),
        message: stderr.to_string(),
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, invocation: &CommandInvocation) -> Result<String, ExecError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(invocation.clone());
        (self.responder)(invocation)
    }
}

/// Probe that reports exactly the given paths as present.
#[derive(Debug, Default, Clone)]
pub(crate) struct FixedProbe(HashSet<PathBuf>);

impl FixedProbe {
    pub(crate) fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl PathProbe for FixedProbe {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_probe_reports_configured_paths_only() {
        let probe = FixedProbe::new(["/repo/a.txt"]);

        assert!(probe.exists(Path::new("/repo/a.txt")));
        assert!(!probe.exists(Path::new("/repo/b.txt")));
    }
}
