//! Chat configuration from TOML (`[chat]` section)

use super::ConfigValidationError;
use docchat_domain::{ChatMode, DEFAULT_MEMORY_CHAR_LIMIT};
use serde::{Deserialize, Serialize};

/// Raw chat behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// "condense_question" or "direct"
    pub mode: String,
    /// Overrides the corpus preset's greeting
    pub greeting: Option<String>,
    /// Characters of earlier conversation used to condense follow-ups;
    /// the latest exchange is always kept
    pub memory_char_limit: usize,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::default().as_str().to_string(),
            greeting: None,
            memory_char_limit: DEFAULT_MEMORY_CHAR_LIMIT,
        }
    }
}

impl FileChatConfig {
    pub fn parse_mode(&self) -> Result<ChatMode, ConfigValidationError> {
        self.mode
            .parse()
            .map_err(|_| ConfigValidationError::InvalidEnumValue {
                field: "chat.mode".to_string(),
                value: self.mode.clone(),
                valid_values: vec!["condense_question".to_string(), "direct".to_string()],
            })
    }
}
