//! Error types for decapta-core

use std::path::PathBuf;

use decapta_fs::NormalizedPath;

/// Result type for decapta-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in decapta-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source or content file could not be parsed
    #[error("Failed to parse {format} file {path}: {message}")]
    Parse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// Column order record for a tabular source is absent
    #[error("Column order record for '{source_name}' not found at {path}")]
    MissingSidecar { source_name: String, path: PathBuf },

    /// A record's fields disagree with the column order record
    #[error("Schema mismatch in {path}: {reason}")]
    SchemaMismatch { path: PathBuf, reason: String },

    /// A per-entity document does not have the expected shape
    #[error("Malformed record in {path}: {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    /// A column is spelled like the alias of a reserved name
    #[error("Column '{column}' in {path} collides with a reserved-name alias")]
    ReservedNameCollision { path: PathBuf, column: String },

    /// The configuration document cannot hold collections
    #[error("Malformed configuration document {path}: {reason}")]
    MalformedConfig { path: PathBuf, reason: String },

    /// Some sources of a batch failed; details are in the batch report
    #[error("{failed} source(s) failed")]
    BatchFailed { failed: usize },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from decapta-fs
    #[error(transparent)]
    Fs(#[from] decapta_fs::Error),

    /// Content error from decapta-content
    #[error(transparent)]
    Content(#[from] decapta_content::Error),
}

impl Error {
    pub fn parse(path: &NormalizedPath, format: &str, message: impl ToString) -> Self {
        Self::Parse {
            path: path.to_native(),
            format: format.to_string(),
            message: message.to_string(),
        }
    }

    pub fn schema_mismatch(path: &NormalizedPath, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            path: path.to_native(),
            reason: reason.into(),
        }
    }

    pub fn malformed_record(path: &NormalizedPath, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.to_native(),
            reason: reason.into(),
        }
    }

    pub fn malformed_config(path: &NormalizedPath, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            path: path.to_native(),
            reason: reason.into(),
        }
    }
}
