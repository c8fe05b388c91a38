//! Condense-question chat engine.
//!
//! Each follow-up question is first rewritten, using the conversation so
//! far, into a standalone question. That standalone question drives
//! retrieval, and the answer is generated from the retrieved chunks under
//! the corpus system prompt.

use super::language_model::{LanguageModel, PromptMessage};
use async_trait::async_trait;
use docchat_application::{QueryEngine, QueryError, RetrievalIndex, StreamHandle};
use docchat_domain::{
    ChatMemory, ChatMode, ChatTurn, EngineOptions, PromptTemplate, StreamEvent,
};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{debug, info};

const FORWARD_BUFFER: usize = 64;

type Memory = Arc<Mutex<ChatMemory>>;

pub struct CondenseQuestionEngine {
    index: Arc<dyn RetrievalIndex>,
    model: Arc<dyn LanguageModel>,
    options: EngineOptions,
    system_prompt: String,
    memory: Memory,
}

impl CondenseQuestionEngine {
    pub fn new(
        index: Arc<dyn RetrievalIndex>,
        model: Arc<dyn LanguageModel>,
        options: EngineOptions,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            index,
            model,
            options,
            system_prompt: system_prompt.into(),
            memory: Arc::new(Mutex::new(ChatMemory::new(options.memory_char_limit))),
        }
    }

    /// Completed exchanges remembered for condensation, oldest first.
    pub fn memory(&self) -> Vec<ChatTurn> {
        self.memory
            .lock()
            .map(|m| m.turns().to_vec())
            .unwrap_or_default()
    }

    async fn standalone_question(&self, question: &str) -> Result<String, QueryError> {
        if self.options.mode != ChatMode::CondenseQuestion {
            return Ok(question.to_string());
        }
        let history = self.memory();
        if history.is_empty() {
            return Ok(question.to_string());
        }

        let prompt = PromptTemplate::condense(&history, question);
        let condensed = self.model.complete(&[PromptMessage::user(prompt)]).await?;
        let condensed = condensed.trim();
        if condensed.is_empty() {
            return Ok(question.to_string());
        }
        info!("Condensed question: {}", condensed);
        Ok(condensed.to_string())
    }
}

#[async_trait]
impl QueryEngine for CondenseQuestionEngine {
    async fn stream_query(&mut self, question: &str) -> Result<StreamHandle, QueryError> {
        let standalone = self.standalone_question(question).await?;

        let chunks = self
            .index
            .retrieve(&standalone, self.options.top_k())
            .await?;
        debug!("Retrieved {} chunks", chunks.len());
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();

        let messages = [
            PromptMessage::system(PromptTemplate::context(&self.system_prompt, &texts)),
            PromptMessage::user(standalone),
        ];

        let upstream = if self.options.streaming {
            self.model.stream(&messages).await?
        } else {
            let answer = self.model.complete(&messages).await?;
            StreamHandle::from_events(vec![StreamEvent::Completed(answer)])
        };

        Ok(remember_on_completion(
            upstream,
            Arc::clone(&self.memory),
            question.to_string(),
        ))
    }
}

/// Relay `upstream`, recording the exchange in memory once it completes.
///
/// Memory is updated before the terminal event is forwarded, so the next
/// query always sees the previous exchange. Failed streams leave memory
/// untouched.
fn remember_on_completion(
    mut upstream: StreamHandle,
    memory: Memory,
    question: String,
) -> StreamHandle {
    let (tx, rx) = mpsc::channel(FORWARD_BUFFER);
    tokio::spawn(async move {
        let mut answer = String::new();
        while let Some(event) = upstream.next_event().await {
            match &event {
                StreamEvent::Delta(fragment) => answer.push_str(fragment),
                StreamEvent::Completed(text) => {
                    let text = if answer.is_empty() {
                        text.clone()
                    } else {
                        std::mem::take(&mut answer)
                    };
                    if let Ok(mut memory) = memory.lock() {
                        memory.record(question.clone(), text);
                    }
                }
                StreamEvent::Error(_) => {}
            }
            let terminal = event.is_terminal();
            if tx.send(event).await.is_err() || terminal {
                break;
            }
        }
    });
    StreamHandle::new(rx)
}
