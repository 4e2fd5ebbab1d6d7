use crate::{CoreError, Result};

const SEPARATORS: [char; 2] = ['/', '\\'];

/// A file path broken into the directory CVS must run in and the bare name it
/// is given on the command line.
///
/// Both separators are honoured regardless of the host platform, so Windows
/// paths with mixed separators split the same way everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath {
    directory: String,
    filename: String,
}

impl SplitPath {
    /// The directory part, trailing separator included. Empty for a bare name.
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `None` when the path had no directory part and the command should run
    /// in the caller's current directory.
    #[must_use]
    pub fn working_directory(&self) -> Option<&str> {
        if self.directory.is_empty() {
            None
        } else {
            Some(&self.directory)
        }
    }
}

/// # Errors
///
/// Returns [`CoreError::MalformedPath`] if the path is empty or ends with a
/// separator.
pub fn split_path(path: &str) -> Result<SplitPath> {
    let (directory, filename) = match path.rfind(SEPARATORS) {
        Some(index) => path.split_at(index + 1),
        None => ("", path),
    };

    if filename.is_empty() {
        return Err(CoreError::MalformedPath {
            path: path.to_string(),
        });
    }

    Ok(SplitPath {
        directory: directory.to_string(),
        filename: filename.to_string(),
    })
}
