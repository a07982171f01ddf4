//! Error types shared across Reelcore crates.

use std::path::PathBuf;

/// Top-level error type for Reelcore operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Project error: {message}")]
    Project { message: String },

    #[error("Compositing error: {message}")]
    Compositing { message: String },

    #[error("Assist error: {message}")]
    Assist { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseAt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn project(msg: impl Into<String>) -> Self {
        Self::Project {
            message: msg.into(),
        }
    }

    pub fn compositing(msg: impl Into<String>) -> Self {
        Self::Compositing {
            message: msg.into(),
        }
    }

    pub fn assist(msg: impl Into<String>) -> Self {
        Self::Assist {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
