use cvs_core::FileStatus;

use crate::markers::{FILE_MARKER, STATUS_MARKERS};

/// Maps the output of `cvs status` for one file to a [`FileStatus`].
///
/// Output without a `File:` block (an error message, for instance) is
/// [`FileStatus::Unknown`], as is a block whose `Status:` phrase is not one we
/// know.
#[must_use]
pub fn parse_status(stdout: &str) -> FileStatus {
    if !stdout.contains(FILE_MARKER) {
        return FileStatus::Unknown;
    }

    STATUS_MARKERS
        .iter()
        .find(|(marker, _)| stdout.contains(marker))
        .map_or(FileStatus::Unknown, |(_, status)| *status)
}
