use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use promptdeck_core::{ChatBackend, ChatRequest, DeckError, ModelConfig, OutboundMessage};

use crate::sse::consume_sse_stream;

/// Client for any server speaking the OpenAI chat completions protocol
/// with streaming enabled (llama.cpp, vLLM, LM Studio, text-generation-webui).
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatClient {
    /// Build a client from a configuration snapshot.
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct StreamingChatBody<'a> {
    model: &'a str,
    messages: &'a [OutboundMessage],
    stream: bool,
    max_tokens: u32,
    temperature: f32,
}

#[async_trait]
impl ChatBackend for OpenAiCompatClient {
    fn name(&self) -> &str {
        "openai-compat"
    }

    async fn stream_chat(
        &self,
        request: &ChatRequest,
        partials: mpsc::UnboundedSender<String>,
        cancel: CancellationToken,
    ) -> Result<String, DeckError> {
        let body = StreamingChatBody {
            model: &request.model,
            messages: &request.messages,
            stream: true,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            model = %request.model,
            message_count = request.messages.len(),
            "Sending streaming chat request"
        );

        let mut http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {key}"));
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(DeckError::Cancelled),
            sent = http_request.send() => {
                sent.map_err(|e| DeckError::Transport(format!("request failed: {e}")))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(DeckError::Transport(format!("API error: {status}")));
        }

        let stream = Box::pin(response.bytes_stream());
        tokio::select! {
            _ = cancel.cancelled() => Err(DeckError::Cancelled),
            text = consume_sse_stream(stream, &partials) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ModelConfig {
            endpoint: "http://localhost:8000/v1/".to_string(),
            ..ModelConfig::default()
        };
        let client = OpenAiCompatClient::new(&config);
        assert_eq!(client.base_url, "http://localhost:8000/v1");

        let client = client.with_base_url("http://localhost:11434/v1");
        assert_eq!(client.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn body_carries_stream_flag_and_params() {
        let body = StreamingChatBody {
            model: "llama3",
            messages: &[],
            stream: true,
            max_tokens: 1000,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama3");
        assert_eq!(json["stream"], true);
        assert_eq!(json["max_tokens"], 1000);
    }
}
