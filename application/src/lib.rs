//! Application layer for docchat
//!
//! This crate contains the chat session use cases, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    chat_output::{ChatOutput, NoChatOutput},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    index::{IndexBuilder, IndexError, RetrievalIndex, RetrievedChunk},
    progress::{BuildProgressNotifier, NoProgress},
    query_engine::{QueryEngine, QueryEngineFactory, QueryError, StreamHandle},
};
pub use use_cases::{
    app_context::AppContext,
    chat_controller::{ChatController, ChatError, ResponseOutcome},
    chat_session::ChatSession,
    index_cache::IndexCache,
};
