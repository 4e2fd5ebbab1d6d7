use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::markers::{EXISTING_TAGS_MARKER, REPOSITORY_REVISION_MARKER};

static REVISION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)+").expect("revision pattern is valid"));

/// Names of the tags that point at the repository (head) revision.
///
/// Reads the tag table that `cvs status -v` prints under `Existing Tags:`,
/// one indented `<tag> (<kind>: <revision>)` row per tag. Tags are returned in
/// table order. Without a repository revision there is nothing to compare
/// against and the result is empty.
#[must_use]
pub fn parse_latest_tags(stdout: &str) -> Vec<String> {
    let Some(head) = repository_revision(stdout) else {
        return Vec::new();
    };

    tag_rows(stdout)
        .filter_map(|row| {
            let parts: Vec<&str> = row.split_whitespace().collect();
            if parts.len() < 3 {
                trace!(row, "skipping tag row without revision column");
                return None;
            }
            let revision = parts[2].trim_matches(|c| c == '(' || c == ')');
            (revision == head).then(|| parts[0].to_string())
        })
        .collect()
}

fn repository_revision(stdout: &str) -> Option<&str> {
    let line = stdout
        .lines()
        .find(|line| line.contains(REPOSITORY_REVISION_MARKER))?;
    REVISION_PATTERN.find(line).map(|m| m.as_str())
}

fn tag_rows(stdout: &str) -> impl Iterator<Item = &str> {
    stdout
        .lines()
        .skip_while(|line| !line.trim_start().starts_with(EXISTING_TAGS_MARKER))
        .skip(1)
        .take_while(|line| line.starts_with([' ', '\t']) && !line.trim().is_empty())
}
