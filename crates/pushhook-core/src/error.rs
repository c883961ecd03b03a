//! Error types for pushhook.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Event errors
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // Registry errors
    #[error("Job registry error: {0}")]
    Registry(String),

    #[error("Invalid job catalog: {0}")]
    Catalog(String),

    #[error("Unknown folder '{folder}' referenced by job '{job}'")]
    UnknownFolder { job: String, folder: String },

    #[error("Duplicate job name: {0}")]
    DuplicateJob(String),

    // Extraction errors
    #[error("Failed to inspect job '{job}': {message}")]
    Extraction { job: String, message: String },

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
