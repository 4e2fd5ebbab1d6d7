use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, split_path};

/// State of a single tracked file relative to its repository.
///
/// `Loading`, `Error` and `NotFound` are never printed by CVS; they describe
/// the client's own view while a query is pending or after it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    #[default]
    Unknown,
    Modified,
    Added,
    Removed,
    Conflict,
    UpToDate,
    NotCvsFile,
    Loading,
    Error,
    NotFound,
}

impl FileStatus {
    #[must_use]
    pub fn is_cvs_reported(self) -> bool {
        !self.is_transient()
    }

    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Loading | Self::Error | Self::NotFound)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "Unknown",
            Self::Modified => "Modified",
            Self::Added => "Added",
            Self::Removed => "Removed",
            Self::Conflict => "Conflict",
            Self::UpToDate => "Up-to-date",
            Self::NotCvsFile => "Not a CVS file",
            Self::Loading => "Loading",
            Self::Error => "Error",
            Self::NotFound => "Not found",
        };
        write!(f, "{s}")
    }
}

/// Metadata extracted from `cvs status -v`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvsInfo {
    pub filename: String,
    pub revision: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CvsOperation {
    Status,
    Add,
    Update,
    Commit,
    Tag,
    History,
}

impl CvsOperation {
    /// The CVS subcommand word.
    #[must_use]
    pub fn subcommand(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Add => "add",
            Self::Update => "update",
            Self::Commit => "commit",
            Self::Tag => "tag",
            Self::History => "history",
        }
    }
}

impl fmt::Display for CvsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Argument {
    value: String,
    quoted: bool,
}

/// One fully-built CVS call: program, argument vector and the directory the
/// child process starts in.
///
/// Arguments are handed to the process as-is; nothing goes through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: String,
    args: Vec<Argument>,
    working_directory: Option<String>,
}

impl CommandInvocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_directory: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Argument {
            value: value.into(),
            quoted: false,
        });
        self
    }

    /// Adds an argument that is shown in double quotes by [`Self::command_line`].
    #[must_use]
    pub fn quoted_arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Argument {
            value: value.into(),
            quoted: true,
        });
        self
    }

    #[must_use]
    pub fn args<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().fold(self, |invocation, value| invocation.arg(value))
    }

    #[must_use]
    pub fn in_directory(mut self, directory: Option<&str>) -> Self {
        self.working_directory = directory.map(String::from);
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.value.as_str())
    }

    #[must_use]
    pub fn working_directory(&self) -> Option<&str> {
        self.working_directory.as_deref()
    }

    /// Renders the invocation as a single line for logs and display.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.quoted {
                line.push('"');
                line.push_str(&arg.value);
                line.push('"');
            } else {
                line.push_str(&arg.value);
            }
        }
        line
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// A file shown to the user, together with the last observed status.
///
/// Starts in [`FileStatus::Loading`] and is resolved once per query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub name: String,
    pub path: String,
    pub selected: bool,
    pub status: FileStatus,
}

impl TrackedFile {
    /// # Errors
    ///
    /// Returns [`crate::CoreError::MalformedPath`] if no file name can be
    /// derived from `path`.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let name = split_path(&path)?.filename().to_string();
        Ok(Self {
            name,
            path,
            selected: true,
            status: FileStatus::Loading,
        })
    }

    pub fn resolve(&mut self, status: FileStatus) {
        self.status = status;
    }
}
