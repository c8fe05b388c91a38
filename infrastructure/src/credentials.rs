//! API credential resolution.
//!
//! The key comes from `[llm] api_key` when set, otherwise from the
//! environment variable named by `[llm] api_key_env`. A missing key is
//! fatal at startup, before any index work begins.

use crate::config::FileLlmConfig;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("No API key found: set the {env} environment variable or llm.api_key")]
    Missing { env: String },
}

/// An API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Resolve the API key from config, then the process environment.
pub fn resolve_api_key(config: &FileLlmConfig) -> Result<ApiKey, CredentialError> {
    resolve_with(config, |name| std::env::var(name).ok())
}

fn resolve_with(
    config: &FileLlmConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiKey, CredentialError> {
    let inline = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string);

    inline
        .or_else(|| {
            lookup(&config.api_key_env)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        })
        .map(ApiKey)
        .ok_or_else(|| CredentialError::Missing {
            env: config.api_key_env.clone(),
        })
}
