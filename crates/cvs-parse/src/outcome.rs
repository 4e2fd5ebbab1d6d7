use cvs_core::CvsOperation;

use crate::markers::outcome_prefix;

/// Whether the stdout of `operation` shows that a change was applied.
///
/// `false` means "nothing changed", which is not a failure: an update of a
/// file that is already current prints nothing at all. Operations without a
/// change prefix (`status`, `history`) are always `false`.
#[must_use]
pub fn parse_outcome(operation: CvsOperation, stdout: &str) -> bool {
    outcome_prefix(operation).is_some_and(|prefix| stdout.starts_with(prefix))
}
