use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Model endpoint configuration.
///
/// A submission snapshots this at call start; changing the config while a
/// turn is in flight never affects that turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible server, e.g. `http://localhost:8000/v1`
    pub endpoint: String,
    /// Bearer token, attached only when present
    pub api_key: Option<String>,
    /// Model name sent in the request body
    pub model_name: String,
    /// Output length cap per completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/v1".to_string(),
            api_key: None,
            model_name: "llama3".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

impl ModelConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("PROMPTDECK_ENDPOINT")
                .unwrap_or(defaults.endpoint),
            api_key: std::env::var("PROMPTDECK_API_KEY").ok().filter(|k| !k.is_empty()),
            model_name: std::env::var("PROMPTDECK_MODEL")
                .unwrap_or(defaults.model_name),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        }
    }

    /// Presence-only validation: endpoint and model name must be non-empty.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.endpoint.trim().is_empty() {
            return Err(DeckError::Config("endpoint must not be empty".into()));
        }
        if self.model_name.trim().is_empty() {
            return Err(DeckError::Config("model name must not be empty".into()));
        }
        Ok(())
    }
}
