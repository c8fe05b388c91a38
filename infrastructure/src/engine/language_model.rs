//! Chat model seam used by the query engine.

use async_trait::async_trait;
use docchat_application::{QueryError, StreamHandle};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// A chat-completion model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Whole answer in one response.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, QueryError>;

    /// Answer as a stream of events ending in exactly one terminal event.
    async fn stream(&self, messages: &[PromptMessage]) -> Result<StreamHandle, QueryError>;
}
