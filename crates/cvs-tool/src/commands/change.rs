use cvs_client::{CommandExecutor, CvsClient};
use cvs_core::CvsOperation;

use crate::error::Result;
use crate::output::{Outcome, ResultFormatter};

pub(crate) fn add<E: CommandExecutor>(
    client: &CvsClient<E>,
    path: &str,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let applied = client.add(path)?;
    report(CvsOperation::Add, vec![path.to_string()], applied, formatter)
}

pub(crate) fn update<E: CommandExecutor>(
    client: &CvsClient<E>,
    path: &str,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let applied = client.update(path)?;
    report(CvsOperation::Update, vec![path.to_string()], applied, formatter)
}

pub(crate) fn commit<E: CommandExecutor>(
    client: &CvsClient<E>,
    path: &str,
    message: &str,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let applied = client.commit(path, message)?;
    report(CvsOperation::Commit, vec![path.to_string()], applied, formatter)
}

pub(crate) fn tag<E: CommandExecutor>(
    client: &CvsClient<E>,
    directory: &str,
    files: &[String],
    tag: &str,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    let applied = client.tag(directory, files, tag)?;
    report(CvsOperation::Tag, files.to_vec(), applied, formatter)
}

fn report(
    operation: CvsOperation,
    targets: Vec<String>,
    applied: bool,
    formatter: &dyn ResultFormatter,
) -> Result<String> {
    formatter.format_outcome(&Outcome {
        operation,
        targets,
        applied,
    })
}
