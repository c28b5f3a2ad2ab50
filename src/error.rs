//! Error types for the autoglot build step
//!
//! `AutoglotError` covers everything the orchestrator can run into. Most of it
//! never leaves the orchestrator: it is logged and folded into a
//! [`RunOutcome`](crate::translate::RunOutcome). Only output-write failures are
//! handed back to the host build.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while preparing, translating or writing locale files
#[derive(Debug, Error)]
pub enum AutoglotError {
    /// No API key was configured explicitly or through the environment
    #[error("API key is required. Set AUTOGLOT_API_KEY or pass apiKey option.")]
    MissingApiKey,

    /// The options failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The source locale file could not be read
    #[error("Failed to read source file '{}': {}", .path.display(), .source)]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file or one of its parent directories could not be written
    #[error("Failed to write '{}': {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The service returned a filename that does not stay inside the output directory
    #[error("Output filename must be a relative path inside the output directory: {0}")]
    InvalidOutputPath(String),

    /// The translation service rejected or failed the job
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Errors raised by a [`TranslationService`](crate::translate::TranslationService)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The translation job itself reported failure
    #[error("Translation job failed: {0}")]
    JobFailed(String),

    /// The client could not be set up from the given settings
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ServiceError::InvalidResponse(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, AutoglotError>;

/// Result type for translation service calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
