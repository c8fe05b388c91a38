//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; conversion into domain types happens
//! through the `parse_*` helpers so that every problem can be reported
//! by [`FileConfig::validate`] before startup continues.

mod chat;
mod corpus;
mod llm;
mod logging;
mod repl;
mod retrieval;

pub use chat::FileChatConfig;
pub use corpus::FileCorpusConfig;
pub use llm::{
    DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, FileLlmConfig,
};
pub use logging::FileLoggingConfig;
pub use repl::FileReplConfig;
pub use retrieval::FileRetrievalConfig;

use docchat_application::SessionConfig;
use docchat_domain::{CorpusPreset, DocumentSource, EngineOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{field}: unknown value '{value}' (expected one of: {})", valid_values.join(", "))]
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },

    #[error("{field} cannot be empty")]
    EmptyValue { field: String },

    #[error("retrieval.top_k must be at least 1")]
    InvalidTopK,

    #[error("retrieval.chunk_overlap ({overlap}) must be smaller than retrieval.chunk_size ({size})")]
    InvalidChunking { size: usize, overlap: usize },

    #[error("retrieval.embed_batch_size must be at least 1")]
    InvalidBatchSize,

    #[error("llm.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Documentation corpus
    pub corpus: FileCorpusConfig,
    /// OpenAI-compatible endpoint
    pub llm: FileLlmConfig,
    /// Chunking and retrieval
    pub retrieval: FileRetrievalConfig,
    /// Chat behavior
    pub chat: FileChatConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Diagnostic and transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if let Err(e) = self.corpus.parse_preset() {
            issues.push(e);
        }
        if let Err(e) = self.chat.parse_mode() {
            issues.push(e);
        }

        for (field, value) in [
            ("llm.model", &self.llm.model),
            ("llm.embedding_model", &self.llm.embedding_model),
            ("llm.base_url", &self.llm.base_url),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyValue {
                    field: field.to_string(),
                });
            }
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            issues.push(ConfigValidationError::InvalidTemperature(
                self.llm.temperature,
            ));
        }

        let retrieval = &self.retrieval;
        if retrieval.top_k == 0 {
            issues.push(ConfigValidationError::InvalidTopK);
        }
        if retrieval.chunk_size == 0 || retrieval.chunk_overlap >= retrieval.chunk_size {
            issues.push(ConfigValidationError::InvalidChunking {
                size: retrieval.chunk_size,
                overlap: retrieval.chunk_overlap,
            });
        }
        if retrieval.embed_batch_size == 0 {
            issues.push(ConfigValidationError::InvalidBatchSize);
        }

        issues
    }

    pub fn preset(&self) -> Result<CorpusPreset, ConfigValidationError> {
        self.corpus.parse_preset()
    }

    pub fn source(&self) -> Result<DocumentSource, ConfigValidationError> {
        Ok(self.corpus.source_for(self.preset()?))
    }

    /// The system prompt: `[llm] system_prompt` or the preset's persona.
    pub fn system_prompt(&self) -> Result<String, ConfigValidationError> {
        match &self.llm.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => Ok(prompt.clone()),
            _ => Ok(self.preset()?.system_prompt().to_string()),
        }
    }

    /// Parameters applied to each new chat session.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigValidationError> {
        let mode = self.chat.parse_mode()?;
        let engine = EngineOptions::new(mode, self.retrieval.top_k)
            .map_err(|_| ConfigValidationError::InvalidTopK)?
            .with_memory_char_limit(self.chat.memory_char_limit);
        let mut config = SessionConfig::for_preset(self.preset()?).with_engine(engine);
        if let Some(greeting) = &self.chat.greeting
            && !greeting.trim().is_empty()
        {
            config = config.with_greeting(greeting.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docchat_domain::ChatMode;
    use std::path::Path;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[corpus]
preset = "streamlit"
source = "./docs/streamlit"

[llm]
api_key_env = "MY_KEY"
model = "gpt-4o-mini"
temperature = 0.0

[retrieval]
top_k = 4
chunk_size = 800
chunk_overlap = 100

[chat]
mode = "direct"
greeting = "Hi there"
memory_char_limit = 4000

[repl]
show_progress = false

[logging]
conversation_log = "/tmp/chat.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        assert_eq!(config.preset().unwrap(), CorpusPreset::Streamlit);
        assert_eq!(
            config.source().unwrap().path(),
            Path::new("./docs/streamlit")
        );
        assert_eq!(config.llm.api_key_env, "MY_KEY");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.retrieval.embed_batch_size, 64);
        assert!(!config.repl.show_progress);

        let session = config.session_config().unwrap();
        assert_eq!(session.greeting, "Hi there");
        assert_eq!(session.engine.mode, ChatMode::Direct);
        assert_eq!(session.engine.top_k(), 4);
        assert_eq!(session.engine.memory_char_limit, 4000);
    }

    #[test]
    fn test_defaults_match_original_application() {
        let config = FileConfig::default();
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.retrieval.top_k, 2);
        assert_eq!(config.chat.memory_char_limit, 12_000);
        assert_eq!(config.preset().unwrap(), CorpusPreset::Latex);
        assert_eq!(
            config.session_config().unwrap().greeting,
            "Ask me a question about LaTeX!"
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_system_prompt_override() {
        let mut config = FileConfig::default();
        assert!(config.system_prompt().unwrap().contains("LaTeX"));

        config.llm.system_prompt = Some("You answer in haiku.".to_string());
        assert_eq!(config.system_prompt().unwrap(), "You answer in haiku.");
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut config = FileConfig::default();
        config.corpus.preset = "sphinx".to_string();
        config.chat.mode = "agentic".to_string();
        config.llm.model = " ".to_string();
        config.llm.temperature = 3.5;
        config.retrieval.top_k = 0;
        config.retrieval.chunk_overlap = 2000;
        config.retrieval.embed_batch_size = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 7);
        assert!(issues.contains(&ConfigValidationError::InvalidTopK));
        assert!(issues.contains(&ConfigValidationError::EmptyValue {
            field: "llm.model".to_string()
        }));
        assert!(issues.contains(&ConfigValidationError::InvalidChunking {
            size: 1024,
            overlap: 2000
        }));
    }

    #[test]
    fn test_session_config_rejects_zero_top_k() {
        let mut config = FileConfig::default();
        config.retrieval.top_k = 0;
        assert_eq!(
            config.session_config().unwrap_err(),
            ConfigValidationError::InvalidTopK
        );
    }

    #[test]
    fn test_blank_greeting_keeps_preset_greeting() {
        let mut config = FileConfig::default();
        config.chat.greeting = Some(String::new());
        assert_eq!(
            config.session_config().unwrap().greeting,
            CorpusPreset::Latex.greeting()
        );
    }
}
