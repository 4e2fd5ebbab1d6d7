use cvs_core::{CommandInvocation, CoreError, CvsOperation, split_path};

use crate::BuildError;

pub const DEFAULT_PROGRAM: &str = "cvs";

/// Turns paths and operations into [`CommandInvocation`]s.
///
/// Single-file operations take a path and run in its directory. `tag` and
/// `history` take a directory plus bare names, in the order given.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CommandBuilder {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// `cvs status -v <filename>`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedPath`] if `path` has no file name.
    pub fn status(&self, path: &str) -> Result<CommandInvocation, BuildError> {
        self.single_file(CvsOperation::Status, &["-v"], path)
    }

    /// `cvs add <filename>`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedPath`] if `path` has no file name.
    pub fn add(&self, path: &str) -> Result<CommandInvocation, BuildError> {
        self.single_file(CvsOperation::Add, &[], path)
    }

    /// `cvs update <filename>`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedPath`] if `path` has no file name.
    pub fn update(&self, path: &str) -> Result<CommandInvocation, BuildError> {
        self.single_file(CvsOperation::Update, &[], path)
    }

    /// `cvs commit -m "<message>" <filename>`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedPath`] if `path` has no file name.
    pub fn commit(&self, path: &str, message: &str) -> Result<CommandInvocation, BuildError> {
        let split = split_path(path)?;
        Ok(self
            .invocation(CvsOperation::Commit)
            .arg("-m")
            .quoted_arg(message)
            .arg(split.filename())
            .in_directory(split.working_directory()))
    }

    /// `cvs tag -F <tag> <filenames>`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingTagName`] for an empty tag and
    /// [`BuildError::MalformedPath`] for an empty list or an empty name.
    pub fn tag<S: AsRef<str>>(
        &self,
        directory: &str,
        filenames: &[S],
        tag: &str,
    ) -> Result<CommandInvocation, BuildError> {
        if tag.trim().is_empty() {
            return Err(BuildError::MissingTagName);
        }
        let names = bare_names(filenames)?;
        Ok(self
            .invocation(CvsOperation::Tag)
            .arg("-F")
            .arg(tag)
            .args(names)
            .in_directory(non_empty(directory)))
    }

    /// `cvs history -alc <filenames>`
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedPath`] for an empty list or an empty
    /// name.
    pub fn history<S: AsRef<str>>(
        &self,
        directory: &str,
        filenames: &[S],
    ) -> Result<CommandInvocation, BuildError> {
        let names = bare_names(filenames)?;
        Ok(self
            .invocation(CvsOperation::History)
            .arg("-alc")
            .args(names)
            .in_directory(non_empty(directory)))
    }

    fn invocation(&self, operation: CvsOperation) -> CommandInvocation {
        CommandInvocation::new(self.program.as_str()).arg(operation.subcommand())
    }

    fn single_file(
        &self,
        operation: CvsOperation,
        flags: &[&str],
        path: &str,
    ) -> Result<CommandInvocation, BuildError> {
        let split = split_path(path)?;
        Ok(self
            .invocation(operation)
            .args(flags.iter().copied())
            .arg(split.filename())
            .in_directory(split.working_directory()))
    }
}

fn bare_names<S: AsRef<str>>(filenames: &[S]) -> Result<Vec<&str>, CoreError> {
    if filenames.is_empty() {
        return Err(CoreError::MalformedPath {
            path: String::new(),
        });
    }
    filenames
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if name.is_empty() {
                Err(CoreError::MalformedPath {
                    path: name.to_string(),
                })
            } else {
                Ok(name)
            }
        })
        .collect()
}

fn non_empty(directory: &str) -> Option<&str> {
    if directory.is_empty() {
        None
    } else {
        Some(directory)
    }
}
