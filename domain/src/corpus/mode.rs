//! Query engine behavior options.

use crate::chat::memory::DEFAULT_MEMORY_CHAR_LIMIT;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of chunks retrieved per question when nothing else is configured.
pub const DEFAULT_TOP_K: usize = 2;

/// How a query engine turns a user message into a retrieval query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Rewrite follow-ups into a standalone question using the conversation so far
    #[default]
    CondenseQuestion,
    /// Retrieve with the raw user message
    Direct,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::CondenseQuestion => "condense_question",
            ChatMode::Direct => "direct",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChatMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "condense_question" | "condense" => Ok(ChatMode::CondenseQuestion),
            "direct" | "simple" => Ok(ChatMode::Direct),
            other => Err(DomainError::UnknownChatMode(other.to_string())),
        }
    }
}

/// Options passed to the query engine factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub mode: ChatMode,
    pub streaming: bool,
    /// Character budget of the conversation memory used for condensation
    pub memory_char_limit: usize,
    top_k: usize,
}

impl EngineOptions {
    pub fn new(mode: ChatMode, top_k: usize) -> Result<Self, DomainError> {
        if top_k == 0 {
            return Err(DomainError::InvalidTopK);
        }
        Ok(Self {
            mode,
            top_k,
            ..Self::default()
        })
    }

    pub fn with_memory_char_limit(mut self, chars: usize) -> Self {
        self.memory_char_limit = chars;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            mode: ChatMode::CondenseQuestion,
            streaming: true,
            memory_char_limit: DEFAULT_MEMORY_CHAR_LIMIT,
            top_k: DEFAULT_TOP_K,
        }
    }
}
