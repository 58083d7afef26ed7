//! Error types for the tokenizer export pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the export pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The model directory does not exist
    #[error("Directory not found: {0}")]
    ModelDirNotFound(PathBuf),

    /// The tokenizer model file is missing from the model directory
    #[error("Tokenizer model not found at {0}")]
    ModelNotFound(PathBuf),

    /// The tokenizer model file could not be decoded
    #[error("Failed to decode tokenizer model {path}: {reason}")]
    ModelDecode { path: PathBuf, reason: String },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// A side file exists but is not valid JSON
    #[error("Failed to parse {path}: {err}")]
    Parse {
        path: PathBuf,
        #[source]
        err: serde_json::Error,
    },

    /// A side file is valid JSON but does not have the expected shape
    #[error("Malformed {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid export configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Token type code outside the known range
    #[error("Unknown token type code: {0}")]
    UnknownTokenType(u8),
}

impl ExportError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
