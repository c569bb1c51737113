//! Render error types.

use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A node renderer rejected its input.
    #[error("Render error: {0}")]
    Custom(String),
}

impl RenderError {
    /// Creates a custom render error.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
