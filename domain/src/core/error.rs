//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Unknown corpus preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown chat mode: {0}")]
    UnknownChatMode(String),

    #[error("top_k must be at least 1")]
    InvalidTopK,
}
