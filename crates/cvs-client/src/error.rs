use cvs_core::CoreError;
use cvs_parse::{FailureKind, classify_failure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    MalformedPath(#[from] CoreError),

    #[error("tag name must not be empty")]
    MissingTagName,
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully. `message` is the decoded
    /// stderr, or a generic description when stderr was empty.
    #[error("{message}")]
    Failed {
        command: String,
        code: Option<i32>,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown text encoding '{label}'")]
    UnknownEncoding { label: String },
}

#[derive(Debug, Error)]
pub enum CvsError {
    #[error("operation not attempted")]
    Build(#[from] BuildError),

    #[error("not a CVS working directory")]
    InvalidCvsRoot(#[source] ExecError),

    #[error(transparent)]
    Exec(ExecError),
}

impl CvsError {
    #[must_use]
    pub fn is_invalid_cvs_root(&self) -> bool {
        matches!(self, Self::InvalidCvsRoot(_))
    }
}

impl From<ExecError> for CvsError {
    fn from(err: ExecError) -> Self {
        let kind = match &err {
            ExecError::Failed { message, .. } => classify_failure(message),
            ExecError::Spawn { .. } => FailureKind::ProcessFailure,
        };
        match kind {
            FailureKind::InvalidCvsRoot => Self::InvalidCvsRoot(err),
            FailureKind::ProcessFailure => Self::Exec(err),
        }
    }
}
