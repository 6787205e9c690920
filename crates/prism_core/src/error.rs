//! Errors raised while building or loading scenes.

use thiserror::Error;

/// Errors that can occur during scene construction and loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene configuration: {0}")]
    Configuration(String),
}

impl SceneError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
