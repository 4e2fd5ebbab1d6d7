use std::fmt;
use std::str::FromStr;

use encoding_rs::Encoding;

use crate::ConfigError;

/// Codepage of the Chinese Windows installations the tool was first deployed
/// on.
pub const DEFAULT_ENCODING_LABEL: &str = "gbk";

/// The legacy text encoding CVS output is decoded with.
///
/// The CVS client writes file names and messages in the system codepage, not
/// UTF-8, so the codec has to match the deployment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEncoding`] if `label` is not a WHATWG
    /// encoding label.
    pub fn for_label(label: &str) -> Result<Self, ConfigError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(Self)
            .ok_or_else(|| ConfigError::UnknownEncoding {
                label: label.to_string(),
            })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decodes raw process output. Malformed sequences become U+FFFD.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> String {
        let (text, had_errors) = self.0.decode_without_bom_handling(bytes);
        if had_errors {
            tracing::debug!(encoding = self.name(), "replaced malformed byte sequences");
        }
        text.into_owned()
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self(encoding_rs::GBK)
    }
}

impl FromStr for TextEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::for_label(s)
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
