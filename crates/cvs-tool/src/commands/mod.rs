mod change;
mod history;
mod info;
mod status;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use cvs_client::{CommandExecutor, CvsClient};

use crate::error::{CliError, Result};
use crate::output::OutputFormat;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show the status of one or more files
    Status {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Show the working revision and tags of a file
    Info { path: PathBuf },
    /// List the tags attached to the repository revision of a file
    LatestTags { path: PathBuf },
    /// Schedule a file for addition
    Add { path: PathBuf },
    /// Bring a file up to date with the repository
    Update { path: PathBuf },
    /// Commit a file with a log message
    Commit {
        #[arg(short, long)]
        message: String,
        path: PathBuf,
    },
    /// Force-set a tag on files in one directory
    Tag {
        /// Directory containing the files (default: current directory)
        #[arg(short = 'C', long = "dir", value_name = "DIR")]
        directory: Option<PathBuf>,
        tag: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Show the history of files in one directory
    History {
        /// Directory containing the files (default: current directory)
        #[arg(short = 'C', long = "dir", value_name = "DIR")]
        directory: Option<PathBuf>,
        #[arg(required = true)]
        files: Vec<String>,
    },
}

impl Commands {
    pub(crate) fn execute<E: CommandExecutor>(
        self,
        client: &CvsClient<E>,
        cwd: &Path,
        format: OutputFormat,
    ) -> Result<()> {
        let formatter = format.formatter();
        let output = match self {
            Self::Status { paths } => {
                let paths = resolve_all(cwd, &paths)?;
                status::run(client, &paths, formatter.as_ref())?
            }
            Self::Info { path } => info::run(client, &resolve(cwd, &path)?, formatter.as_ref())?,
            Self::LatestTags { path } => {
                info::run_latest_tags(client, &resolve(cwd, &path)?, formatter.as_ref())?
            }
            Self::Add { path } => change::add(client, &resolve(cwd, &path)?, formatter.as_ref())?,
            Self::Update { path } => {
                change::update(client, &resolve(cwd, &path)?, formatter.as_ref())?
            }
            Self::Commit { message, path } => {
                change::commit(client, &resolve(cwd, &path)?, &message, formatter.as_ref())?
            }
            Self::Tag {
                directory,
                tag,
                files,
            } => {
                let directory = resolve_directory(cwd, directory.as_deref())?;
                change::tag(client, &directory, &files, &tag, formatter.as_ref())?
            }
            Self::History { directory, files } => {
                let directory = resolve_directory(cwd, directory.as_deref())?;
                history::run(client, &directory, &files, formatter.as_ref())?
            }
        };

        print!("{output}");
        Ok(())
    }
}

/// Makes `path` absolute against `cwd` and converts it to the string form
/// CVS calls take. A trailing separator is kept so it is still rejected as
/// a malformed file path.
fn resolve(cwd: &Path, path: &Path) -> Result<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let simplified = dunce::simplified(&absolute);
    simplified
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| CliError::NonUtf8Path(simplified.to_path_buf()))
}

fn resolve_all(cwd: &Path, paths: &[PathBuf]) -> Result<Vec<String>> {
    paths.iter().map(|path| resolve(cwd, path)).collect()
}

fn resolve_directory(cwd: &Path, directory: Option<&Path>) -> Result<String> {
    resolve(cwd, directory.unwrap_or(cwd))
}
