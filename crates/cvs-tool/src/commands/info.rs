use cvs_client::{CommandExecutor, CvsClient};

use crate::error::Result;
use crate::output::ResultFormatter;

pub(crate) fn run<E: CommandExecutor>(
    client: &CvsClient<E>,
    path: &str,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let info = client.info(path)?;
    formatter.format_info(&info)
}

pub(crate) fn run_latest_tags<E: CommandExecutor>(
    client: &CvsClient<E>,
    path: &str,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let tags = client.latest_tags(path)?;
    formatter.format_latest_tags(path, &tags)
}
