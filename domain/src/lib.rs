//! Domain layer for docchat
//!
//! This crate contains the core entities and value objects of a document
//! chat: turns, the per-session history, corpus presets and prompts.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Chat history
//!
//! A session's [`ChatHistory`] starts with one assistant greeting and only
//! ever grows. Its [`ChatState`] is derived from the role of the last turn:
//!
//! - **AwaitingUser**: the last turn is from the assistant
//! - **AwaitingAssistant**: a user question is still unanswered
//!
//! ## Corpus
//!
//! A [`CorpusPreset`] names a document set (LaTeX manual, Streamlit docs)
//! together with its greeting and system prompt.

pub mod chat;
pub mod core;
pub mod corpus;
pub mod prompt;

// Re-export commonly used types
pub use chat::{
    entities::{ChatTurn, ERROR_NOTICE_PREFIX, Role},
    history::{ChatHistory, ChatState},
    memory::{ChatMemory, DEFAULT_MEMORY_CHAR_LIMIT},
    stream::{StreamEvent, StreamFailure},
};
pub use core::{error::DomainError, question::Question, string::preview};
pub use corpus::{
    document::{Document, DocumentSource},
    mode::{ChatMode, DEFAULT_TOP_K, EngineOptions},
    preset::CorpusPreset,
};
pub use prompt::PromptTemplate;
