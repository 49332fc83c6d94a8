use thiserror::Error;

/// Top-level error type for the PromptDeck runtime.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("a turn is already being generated")]
    Busy,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
