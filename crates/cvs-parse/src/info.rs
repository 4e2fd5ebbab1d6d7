use cvs_core::CvsInfo;

use crate::markers::{EXISTING_TAGS_MARKER, FILE_MARKER, STATUS_MARKER, WORKING_REVISION_MARKER};

/// Extracts file name, working revision and tag names from `cvs status -v`.
///
/// Each field is looked up independently on the first line carrying its
/// marker. A missing marker leaves the field empty.
#[must_use]
pub fn parse_info(stdout: &str) -> CvsInfo {
    let filename = value_after(stdout, FILE_MARKER)
        .map(|rest| {
            rest.find(STATUS_MARKER)
                .map_or(rest, |index| &rest[..index])
                .trim()
                .to_string()
        })
        .unwrap_or_default();

    let revision = value_after(stdout, WORKING_REVISION_MARKER)
        .map(|rest| {
            let rest = rest.trim();
            match rest.split_whitespace().next() {
                Some(token) if is_revision(token) => token.to_string(),
                _ => rest.to_string(),
            }
        })
        .unwrap_or_default();

    let tags = value_after(stdout, EXISTING_TAGS_MARKER)
        .map(|rest| rest.split_whitespace().map(String::from).collect())
        .unwrap_or_default();

    CvsInfo {
        filename,
        revision,
        tags,
    }
}

fn value_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.lines()
        .find_map(|line| line.find(marker).map(|index| &line[index + marker.len()..]))
}

pub(crate) fn is_revision(token: &str) -> bool {
    !token.is_empty()
        && token.contains('.')
        && !token.starts_with('.')
        && !token.ends_with('.')
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}
