//! Error handling for the resume qualifier

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QualifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing input: {0}")]
    InputMissing(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Invalid date '{token}': {reason}")]
    DateParse { token: String, reason: String },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QualifierError>;

impl QualifierError {
    /// HTTP-style status class reported to the caller.
    ///
    /// Problems with what the caller supplied are 4xx; everything that goes
    /// wrong while reading or scoring the documents is 5xx.
    pub fn status_code(&self) -> u16 {
        match self {
            QualifierError::InputMissing(_)
            | QualifierError::InvalidInput(_)
            | QualifierError::UnsupportedFormat(_) => 400,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
