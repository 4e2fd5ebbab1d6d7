use cvs_client::{CommandExecutor, CvsClient};
use cvs_core::{FileSystemProbe, TrackedFile};
use tracing::warn;

use crate::error::Result;
use crate::output::ResultFormatter;

/// Missing files, non-CVS files and failed queries are reported per file;
/// only an invalid path aborts.
pub(crate) fn run<E: CommandExecutor>(
    client: &CvsClient<E>,
    paths: &[String],
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let mut files = paths
        .iter()
        .map(|path| TrackedFile::new(path.as_str()))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    client.refresh_all(&mut files, &FileSystemProbe);

    let unresolved = files.iter().filter(|file| file.status.is_transient()).count();
    if unresolved > 0 {
        warn!(unresolved, total = files.len(), "some files could not be queried");
    }

    formatter.format_statuses(&files)
}
