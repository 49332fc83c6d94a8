use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use promptdeck_core::{ChatBackend, ChatRequest, DeckError};

/// A scripted chat backend that streams canned fragments without a network.
pub struct MockBackend {
    fragments: Vec<String>,
    failure: Option<String>,
}

impl MockBackend {
    /// Backend that streams the given fragments in order, then completes.
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    /// Backend that fails every request with a transport error.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            fragments: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn stream_chat(
        &self,
        _request: &ChatRequest,
        partials: mpsc::UnboundedSender<String>,
        _cancel: CancellationToken,
    ) -> Result<String, DeckError> {
        if let Some(reason) = &self.failure {
            return Err(DeckError::Transport(reason.clone()));
        }

        let mut accumulator = String::new();
        for fragment in &self.fragments {
            accumulator.push_str(fragment);
            let _ = partials.send(accumulator.clone());
        }
        Ok(accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptdeck_core::ModelConfig;

    #[tokio::test]
    async fn scripted_fragments_accumulate() {
        let backend = MockBackend::with_fragments(["Hi", " there"]);
        let request = ChatRequest::new(&ModelConfig::default(), Vec::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let text = backend
            .stream_chat(&request, tx, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(text, "Hi there");
        assert_eq!(rx.recv().await.unwrap(), "Hi");
        assert_eq!(rx.recv().await.unwrap(), "Hi there");
    }

    #[tokio::test]
    async fn unreachable_fails_before_emitting() {
        let backend = MockBackend::unreachable("connection refused");
        let request = ChatRequest::new(&ModelConfig::default(), Vec::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let result = backend
            .stream_chat(&request, tx, CancellationToken::new())
            .await;

        assert!(matches!(result, Err(DeckError::Transport(_))));
        assert!(rx.recv().await.is_none());
    }
}
