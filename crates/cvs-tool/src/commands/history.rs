use cvs_client::{CommandExecutor, CvsClient};

use crate::error::Result;
use crate::output::ResultFormatter;

pub(crate) fn run<E: CommandExecutor>(
    client: &CvsClient<E>,
    directory: &str,
    files: &[String],
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let history = client.history(directory, files)?;
    formatter.format_history(&history)
}
