//! Port adapters backed by [`OpenAiClient`].

use super::client::OpenAiClient;
use crate::engine::{LanguageModel, PromptMessage};
use crate::index::Embedder;
use async_trait::async_trait;
use docchat_application::{IndexError, QueryError, StreamHandle};

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, IndexError> {
        Ok(OpenAiClient::embed(self, texts).await?)
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, QueryError> {
        Ok(OpenAiClient::complete(self, messages).await?)
    }

    async fn stream(&self, messages: &[PromptMessage]) -> Result<StreamHandle, QueryError> {
        Ok(self.stream_chat(messages).await?)
    }
}
