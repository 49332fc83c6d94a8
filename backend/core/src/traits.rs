use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::ModelConfig;
use crate::error::DeckError;
use crate::types::OutboundMessage;

/// Request to a chat backend: the outbound history plus the generation
/// parameters snapshotted from the active [`ModelConfig`].
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<OutboundMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(config: &ModelConfig, messages: Vec<OutboundMessage>) -> Self {
        Self {
            model: config.model_name.clone(),
            messages,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Trait for chat backends that stream completions.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name (e.g. "openai-compat", "mock").
    fn name(&self) -> &str;

    /// Stream a completion for `request`, pushing each updated accumulator
    /// value into `partials` as fragments arrive. Returns the final
    /// accumulated text once the stream ends.
    ///
    /// An empty final text is a valid completion; transport failures
    /// (unreachable endpoint, non-success status, missing body) surface
    /// as [`DeckError::Transport`] with nothing emitted.
    async fn stream_chat(
        &self,
        request: &ChatRequest,
        partials: mpsc::UnboundedSender<String>,
        cancel: CancellationToken,
    ) -> Result<String, DeckError>;
}
