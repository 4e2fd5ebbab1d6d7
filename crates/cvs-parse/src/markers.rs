use cvs_core::{CvsOperation, FileStatus};

/// Present in every per-file block of `cvs status`.
pub const FILE_MARKER: &str = "File:";

pub const WORKING_REVISION_MARKER: &str = "Working revision:";

pub const REPOSITORY_REVISION_MARKER: &str = "Repository revision";

pub const EXISTING_TAGS_MARKER: &str = "Existing Tags:";

pub const STATUS_MARKER: &str = "Status:";

pub const NO_CVSROOT_MARKER: &str = "No CVSROOT specified";

/// Checked in order; the first phrase found decides the status.
pub const STATUS_MARKERS: &[(&str, FileStatus)] = &[
    ("Status: Up-to-date", FileStatus::UpToDate),
    ("Status: Locally Modified", FileStatus::Modified),
    ("Status: Locally Added", FileStatus::Added),
    ("Status: Removed", FileStatus::Removed),
    ("Status: Unresolved Conflict", FileStatus::Conflict),
];

/// Leading text of stdout when an operation actually changed something.
#[must_use]
pub fn outcome_prefix(operation: CvsOperation) -> Option<&'static str> {
    match operation {
        CvsOperation::Add => Some("scheduling file"),
        CvsOperation::Update => Some("U"),
        CvsOperation::Commit => Some("Checking in"),
        CvsOperation::Tag => Some("T"),
        CvsOperation::Status | CvsOperation::History => None,
    }
}
