use crate::markers::NO_CVSROOT_MARKER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The working directory is not tied to any repository.
    InvalidCvsRoot,
    ProcessFailure,
}

/// Sorts the error text of a failed CVS call.
#[must_use]
pub fn classify_failure(message: &str) -> FailureKind {
    if message.contains(NO_CVSROOT_MARKER) {
        FailureKind::InvalidCvsRoot
    } else {
        FailureKind::ProcessFailure
    }
}
