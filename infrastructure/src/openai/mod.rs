//! OpenAI-compatible API adapter
//!
//! Talks to any endpoint implementing the OpenAI `/v1/embeddings` and
//! `/v1/chat/completions` routes. Streaming answers are read as
//! Server-Sent Events and forwarded as [`StreamEvent`](docchat_domain::StreamEvent)s.
//!
//! [`OpenAiClient`] implements both the [`Embedder`](crate::index::Embedder)
//! and [`LanguageModel`](crate::engine::LanguageModel) seams.

mod adapter;
pub mod client;
pub mod error;
pub mod protocol;
pub mod sse;

pub use client::OpenAiClient;
pub use error::OpenAiError;
pub use sse::{SseEvent, SseParser};
