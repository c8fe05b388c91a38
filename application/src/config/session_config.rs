//! Session parameters: what every new chat session starts with.

use docchat_domain::{CorpusPreset, EngineOptions};

/// Parameters applied to each new [`ChatSession`](crate::use_cases::chat_session::ChatSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Content of the seeded assistant turn.
    pub greeting: String,
    /// Options handed to the query engine factory.
    pub engine: EngineOptions,
}

impl SessionConfig {
    pub fn for_preset(preset: CorpusPreset) -> Self {
        Self {
            greeting: preset.greeting().to_string(),
            engine: EngineOptions::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_engine(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_preset(CorpusPreset::default())
    }
}
