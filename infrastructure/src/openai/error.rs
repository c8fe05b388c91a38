//! Error types for the OpenAI-compatible adapter

use docchat_application::{IndexError, QueryError};
use thiserror::Error;

/// Result type alias for OpenAI operations
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors that can occur when talking to an OpenAI-compatible endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpenAiError {
    /// The endpoint answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request or response body could not be transferred.
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered, but not with what was asked for.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for OpenAiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            OpenAiError::UnexpectedResponse(e.to_string())
        } else {
            OpenAiError::Transport(e.to_string())
        }
    }
}

impl From<OpenAiError> for QueryError {
    fn from(e: OpenAiError) -> Self {
        match e {
            OpenAiError::Transport(msg) => QueryError::Transport(msg),
            other => QueryError::ModelApi(other.to_string()),
        }
    }
}

impl From<OpenAiError> for IndexError {
    fn from(e: OpenAiError) -> Self {
        IndexError::Embedding(e.to_string())
    }
}
