use std::path::Path;

use cvs_client::{DEFAULT_ENCODING_LABEL, DEFAULT_PROGRAM, TextEncoding};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

pub(crate) const CONFIG_FILE_NAME: &str = "cvs-tool.toml";
pub(crate) const EXECUTABLE_ENV: &str = "CVS_TOOL_EXECUTABLE";
pub(crate) const ENCODING_ENV: &str = "CVS_TOOL_ENCODING";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    executable: Option<String>,
    encoding: Option<String>,
}

/// Values from a single configuration layer. Unset fields fall through to
/// the layer below.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigOverrides {
    executable: Option<String>,
    encoding: Option<String>,
}

impl ConfigOverrides {
    pub(crate) fn new(executable: Option<String>, encoding: Option<String>) -> Self {
        Self {
            executable,
            encoding,
        }
    }

    fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());
        Self::new(non_empty(EXECUTABLE_ENV), non_empty(ENCODING_ENV))
    }
}

impl From<ConfigFile> for ConfigOverrides {
    fn from(file: ConfigFile) -> Self {
        Self::new(file.executable, file.encoding)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ToolConfig {
    executable: String,
    encoding: TextEncoding,
}

impl ToolConfig {
    /// Layers, lowest to highest: defaults, configuration file, environment,
    /// command-line flags.
    pub(crate) fn load(
        explicit_path: Option<&Path>,
        cwd: &Path,
        flags: ConfigOverrides,
    ) -> Result<Self> {
        let file = match explicit_path {
            Some(path) => read_config_file(path)?,
            None => {
                let path = cwd.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    read_config_file(&path)?
                } else {
                    ConfigFile::default()
                }
            }
        };
        let env = ConfigOverrides::from_env(|key| std::env::var(key).ok());

        Self::resolve([file.into(), env, flags])
    }

    fn resolve(layers: [ConfigOverrides; 3]) -> Result<Self> {
        let mut executable = DEFAULT_PROGRAM.to_string();
        let mut encoding = DEFAULT_ENCODING_LABEL.to_string();
        for layer in layers {
            if let Some(value) = layer.executable {
                executable = value;
            }
            if let Some(value) = layer.encoding {
                encoding = value;
            }
        }

        let encoding = TextEncoding::for_label(&encoding)?;
        debug!(%executable, encoding = encoding.name(), "resolved configuration");

        Ok(Self {
            executable,
            encoding,
        })
    }

    pub(crate) fn executable(&self) -> &str {
        &self.executable
    }

    pub(crate) fn encoding(&self) -> TextEncoding {
        self.encoding
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
