//! Corpus configuration from TOML (`[corpus]` section)

use super::ConfigValidationError;
use docchat_domain::{CorpusPreset, DocumentSource};
use serde::{Deserialize, Serialize};

/// Raw corpus configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// Preset name: "latex" or "streamlit"
    pub preset: String,
    /// Documentation directory or file; the preset's default when unset
    pub source: Option<String>,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            preset: CorpusPreset::default().as_str().to_string(),
            source: None,
        }
    }
}

impl FileCorpusConfig {
    pub fn parse_preset(&self) -> Result<CorpusPreset, ConfigValidationError> {
        self.preset
            .parse()
            .map_err(|_| ConfigValidationError::InvalidEnumValue {
                field: "corpus.preset".to_string(),
                value: self.preset.clone(),
                valid_values: vec!["latex".to_string(), "streamlit".to_string()],
            })
    }

    /// The configured source, falling back to the preset's data directory.
    pub fn source_for(&self, preset: CorpusPreset) -> DocumentSource {
        match self.source.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => DocumentSource::new(path),
            _ => DocumentSource::new(preset.default_source()),
        }
    }
}
