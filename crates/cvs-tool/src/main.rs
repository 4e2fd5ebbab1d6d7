mod commands;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use cvs_client::{CommandBuilder, CvsClient, ProcessExecutor};
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::config::{ConfigOverrides, ToolConfig};
use crate::error::CliError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "cvs-tool")]
#[command(bin_name = "cvs-tool")]
#[command(about = "Inspect and update files in CVS working copies", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: cvs-tool.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CVS client executable to run
    #[arg(long = "cvs", value_name = "PROGRAM", global = true)]
    executable: Option<String>,

    /// Text encoding of the CVS client's output
    #[arg(long, value_name = "LABEL", global = true)]
    encoding: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let cwd = std::env::current_dir().map_err(CliError::CurrentDir)?;
    let flags = ConfigOverrides::new(cli.executable, cli.encoding);
    let config = ToolConfig::load(cli.config.as_deref(), &cwd, flags)?;

    let client = CvsClient::new(
        CommandBuilder::new(config.executable()),
        ProcessExecutor::new(config.encoding()),
    );
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };

    cli.command.execute(&client, &cwd, format)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
