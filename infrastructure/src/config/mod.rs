//! Configuration file loading for docchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DOCCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./docchat.toml` or `./.docchat.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/docchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, FileChatConfig, FileConfig, FileCorpusConfig,
    FileLlmConfig, FileLoggingConfig, FileReplConfig, FileRetrievalConfig,
};
pub use loader::ConfigLoader;
