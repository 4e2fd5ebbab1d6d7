mod formatter;
mod json;
mod plain;

pub(crate) use formatter::{Outcome, ResultFormatter};
pub(crate) use json::JsonFormatter;
pub(crate) use plain::PlainTextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

impl OutputFormat {
    pub(crate) fn formatter(self) -> Box<dyn ResultFormatter> {
        match self {
            Self::Plain => Box::new(PlainTextFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}
