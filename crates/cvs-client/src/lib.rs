mod builder;
mod client;
mod encoding;
mod error;
mod executor;
mod locks;

#[cfg(test)]
pub(crate) mod mocks;

pub use builder::{CommandBuilder, DEFAULT_PROGRAM};
pub use client::{CvsClient, status_from_query};
pub use encoding::{DEFAULT_ENCODING_LABEL, TextEncoding};
pub use error::{BuildError, ConfigError, CvsError, ExecError};
pub use executor::{CommandExecutor, ProcessExecutor};
pub use locks::DirectoryLocks;

pub type Result<T> = std::result::Result<T, CvsError>;
