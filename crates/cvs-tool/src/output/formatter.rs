use cvs_core::{CvsInfo, CvsOperation, TrackedFile};
use serde::Serialize;

use crate::error::Result;

/// Result of a state-changing operation on one or more files.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Outcome {
    pub operation: CvsOperation,
    pub targets: Vec<String>,
    pub applied: bool,
}

pub(crate) trait ResultFormatter {
    fn format_statuses(&self, files: &[TrackedFile]) -> Result<String>;
    fn format_info(&self, info: &CvsInfo) -> Result<String>;
    fn format_latest_tags(&self, path: &str, tags: &[String]) -> Result<String>;
    fn format_outcome(&self, outcome: &Outcome) -> Result<String>;
    fn format_history(&self, history: &str) -> Result<String>;
}
