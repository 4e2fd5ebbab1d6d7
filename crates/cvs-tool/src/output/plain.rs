use cvs_core::{CvsInfo, TrackedFile};

use super::{Outcome, ResultFormatter};
use crate::error::Result;

pub(crate) struct PlainTextFormatter;

impl PlainTextFormatter {
    fn status_width(files: &[TrackedFile]) -> usize {
        files
            .iter()
            .map(|file| file.status.to_string().len())
            .max()
            .unwrap_or(0)
    }
}

impl ResultFormatter for PlainTextFormatter {
    fn format_statuses(&self, files: &[TrackedFile]) -> Result<String> {
        let width = Self::status_width(files);
        let mut output = String::new();
        for file in files {
            let status = file.status.to_string();
            output.push_str(&format!("{status:<width$}  {}\n", file.path));
        }
        Ok(output)
    }

    fn format_info(&self, info: &CvsInfo) -> Result<String> {
        let tags = if info.tags.is_empty() {
            "(none)".to_string()
        } else {
            info.tags.join(" ")
        };

        let mut output = String::new();
        output.push_str(&format!("File:     {}\n", info.filename));
        output.push_str(&format!("Revision: {}\n", info.revision));
        output.push_str(&format!("Tags:     {tags}\n"));
        Ok(output)
    }

    fn format_latest_tags(&self, path: &str, tags: &[String]) -> Result<String> {
        if tags.is_empty() {
            return Ok(format!("No tags on the repository revision of {path}\n"));
        }

        let mut output = String::new();
        for tag in tags {
            output.push_str(tag);
            output.push('\n');
        }
        Ok(output)
    }

    fn format_outcome(&self, outcome: &Outcome) -> Result<String> {
        let targets = outcome.targets.join(", ");
        let verdict = if outcome.applied {
            "applied"
        } else {
            "no change"
        };
        Ok(format!("{}: {verdict} ({targets})\n", outcome.operation))
    }

    fn format_history(&self, history: &str) -> Result<String> {
        if history.is_empty() {
            return Ok("No history recorded.\n".to_string());
        }
        Ok(format!("{history}\n"))
    }
}
