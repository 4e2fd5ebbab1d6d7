use cvs_core::{CvsInfo, TrackedFile};
use serde::Serialize;
use serde_json::json;

use super::{Outcome, ResultFormatter};
use crate::error::Result;

/// One JSON document per invocation, newline terminated.
pub(crate) struct JsonFormatter;

fn to_line(value: &impl Serialize) -> Result<String> {
    let mut line = serde_json::to_string_pretty(value)?;
    line.push('\n');
    Ok(line)
}

impl ResultFormatter for JsonFormatter {
    fn format_statuses(&self, files: &[TrackedFile]) -> Result<String> {
        to_line(&files)
    }

    fn format_info(&self, info: &CvsInfo) -> Result<String> {
        to_line(info)
    }

    fn format_latest_tags(&self, path: &str, tags: &[String]) -> Result<String> {
        to_line(&json!({ "path": path, "tags": tags }))
    }

    fn format_outcome(&self, outcome: &Outcome) -> Result<String> {
        to_line(outcome)
    }

    fn format_history(&self, history: &str) -> Result<String> {
        to_line(&json!({ "history": history }))
    }
}
