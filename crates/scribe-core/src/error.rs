//! Error types for scribe.

use thiserror::Error;

/// Result type alias using scribe's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scribe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty input fields
    #[error("{0}")]
    Validation(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Reading or writing the note document failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The note document is not well-formed JSON
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// The canonical error for an unknown note id.
    pub fn note_not_found() -> Self {
        Error::NotFound("Note not found".to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
