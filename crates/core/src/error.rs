//! Error types for slide deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// A required top-level key is missing from the deck content. Fatal.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The requested template identifier is not known. Caller error.
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize JSON content.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A slide could not be rendered. The assembler logs this and moves on
    /// to the next slide.
    #[error("Slide render error: {0}")]
    Render(String),

    /// An image or icon could not be fetched or applied. The renderer logs
    /// this and continues without the decoration.
    #[error("Decoration error: {0}")]
    Decoration(String),
}
