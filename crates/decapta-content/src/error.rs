//! Error types for decapta-content

/// Result type for decapta-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in decapta-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content at line {line}: {message}")]
    Parse {
        format: String,
        line: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            line,
            message: message.into(),
        }
    }
}
