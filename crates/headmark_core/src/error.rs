//! Pipeline error types.

use headmark_html::RenderError;
use headmark_parser::ParseError;
use thiserror::Error;

/// Errors that can occur while converting a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The document could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        Self::Render(RenderError::Io(err))
    }
}
