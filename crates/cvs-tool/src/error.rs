use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("failed to read configuration file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration")]
    Config(#[from] cvs_client::ConfigError),

    #[error("path is not valid UTF-8: '{}'", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("invalid file path")]
    Path(#[from] cvs_core::CoreError),

    #[error("CVS operation failed")]
    Cvs(#[from] cvs_client::CvsError),

    #[error("failed to serialize output")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
