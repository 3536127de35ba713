//! Error handling for the persona ranker application

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersonaRankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input validation error: {0}")]
    InputValidation(String),

    #[error("Extraction failed for '{document}': {message}")]
    DocumentExtraction { document: String, message: String },

    #[error("Embedding model initialization failed: {0}")]
    ModelInitialization(String),

    #[error("Parse error in '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("No sections could be extracted from any document")]
    NoContent,

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Run cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PersonaRankerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for PersonaRankerError {
    fn from(err: anyhow::Error) -> Self {
        PersonaRankerError::Processing(err.to_string())
    }
}
