//! Error types for tocpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for tocpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while exporting editor content.
#[derive(Error, Debug)]
pub enum Error {
    /// The editor had no content to export.
    #[error("Editor content is empty")]
    EmptyContent,

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error converting HTML into content nodes.
    #[error("Conversion error: {0}")]
    Convert(String),

    /// Error during rendering (PDF, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error raised by the PDF object writer.
    #[error("PDF writer error: {0}")]
    Pdf(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown page size name.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}
