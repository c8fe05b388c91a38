//! Language model configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Raw OpenAI-compatible endpoint configuration
///
/// ```toml
/// [llm]
/// api_key_env = "OPENAI_API_KEY"
/// model = "gpt-3.5-turbo"
/// temperature = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Inline API key (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    /// Base URL, without the `/v1` suffix
    pub base_url: String,
    /// Chat completion model
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Embedding model used for indexing and retrieval
    pub embedding_model: String,
    /// Overrides the corpus preset's system prompt
    pub system_prompt: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            system_prompt: None,
            timeout_secs: Some(120),
        }
    }
}
