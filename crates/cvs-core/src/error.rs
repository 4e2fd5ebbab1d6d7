use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("malformed path '{path}': no file name after the last separator")]
    MalformedPath { path: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn malformed_path_message_includes_path() {
        let err = CoreError::MalformedPath {
            path: "C:\\proj\\".to_string(),
        };

        assert!(err.to_string().contains("C:\\proj\\"));
    }
}
