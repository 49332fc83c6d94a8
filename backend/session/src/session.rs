//! Conversation session: append-only turn history plus the submit-turn
//! dispatch between the real streamed path and the simulated fallback.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use promptdeck_core::{
    ChatBackend, ChatRequest, DeckError, ModelConfig, OutboundMessage, SessionEvent, Turn,
};

use crate::fallback::{SimulatedResponder, TypingCadence};

const SEED_GREETING: &str = "Hello! I'm a local LLM assistant. How can I help you today?";

/// Outcome of the real-path attempt against the configured endpoint.
/// Consumed by a single dispatcher that always finalizes exactly one
/// assistant turn per submission.
#[derive(Debug)]
enum RealPathOutcome {
    Delivered(String),
    Unavailable(String),
}

/// A chat conversation with ordered, append-only history.
///
/// Per submitted turn the session moves `Idle -> AwaitingResponse ->
/// Finalized`: the awaiting phase streams partial text through
/// [`SessionEvent::Streaming`] (entered via the real route or the
/// fallback route, never both), and finalization appends exactly one
/// assistant turn. A single submission may be in flight at a time.
pub struct ConversationSession {
    history: Vec<Turn>,
    generating: bool,
    events: mpsc::UnboundedSender<SessionEvent>,
    responder: SimulatedResponder,
}

impl ConversationSession {
    /// Create a session seeded with the assistant greeting turn.
    pub fn new(events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self::with_cadence(events, TypingCadence::default())
    }

    /// Create a session with an explicit fallback typing cadence.
    pub fn with_cadence(
        events: mpsc::UnboundedSender<SessionEvent>,
        cadence: TypingCadence,
    ) -> Self {
        Self {
            history: vec![Turn::assistant(SEED_GREETING)],
            generating: false,
            events,
            responder: SimulatedResponder::new(cadence),
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Whether a submission is currently in flight. Callers use this as
    /// the guard against overlapping submissions; `submit_turn` enforces
    /// it as well.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Submit a user turn and drive it to a finalized assistant turn.
    ///
    /// Blank input is a no-op (`Ok(None)`, nothing appended). Otherwise a
    /// user turn is appended, the configured endpoint is attempted with
    /// the full history, and on any transport failure the simulated
    /// fallback substitutes a reply generated from the same input. Either
    /// way exactly one assistant turn is appended and returned.
    ///
    /// `config` is read once at call start; later changes never affect a
    /// submission already in flight. `cancel` aborts the real path only;
    /// a cancelled submission appends no assistant turn.
    pub async fn submit_turn(
        &mut self,
        backend: &dyn ChatBackend,
        config: &ModelConfig,
        text: &str,
        cancel: CancellationToken,
    ) -> Result<Option<Turn>, DeckError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if self.generating {
            return Err(DeckError::Busy);
        }

        self.generating = true;
        let result = self.run_submission(backend, config, text, cancel).await;
        self.generating = false;
        result.map(Some)
    }

    async fn run_submission(
        &mut self,
        backend: &dyn ChatBackend,
        config: &ModelConfig,
        text: &str,
        cancel: CancellationToken,
    ) -> Result<Turn, DeckError> {
        self.push_turn(Turn::user(text));

        let messages: Vec<OutboundMessage> =
            self.history.iter().map(OutboundMessage::from).collect();
        let request = ChatRequest::new(config, messages);

        let final_text = match self.attempt_real_path(backend, &request, cancel).await? {
            RealPathOutcome::Delivered(reply) => {
                info!(
                    backend = backend.name(),
                    chars = reply.len(),
                    "Completion delivered"
                );
                reply
            }
            RealPathOutcome::Unavailable(reason) => {
                warn!(reason = %reason, "Endpoint unreachable, substituting simulated reply");
                let _ = self
                    .events
                    .send(SessionEvent::EndpointUnreachable { reason });

                let (partials, forwarder) = self.forward_partials();
                let reply = self.responder.respond(text, &partials).await;
                drop(partials);
                let _ = forwarder.await;
                reply
            }
        };

        let turn = Turn::assistant(final_text);
        self.push_turn(turn.clone());
        Ok(turn)
    }

    /// Try the configured endpoint. Any failure other than cancellation
    /// becomes an `Unavailable` outcome for the fallback dispatcher; no
    /// partial content from a failed attempt is retained.
    async fn attempt_real_path(
        &self,
        backend: &dyn ChatBackend,
        request: &ChatRequest,
        cancel: CancellationToken,
    ) -> Result<RealPathOutcome, DeckError> {
        let (partials, forwarder) = self.forward_partials();
        let result = backend.stream_chat(request, partials, cancel).await;
        let _ = forwarder.await;

        match result {
            Ok(text) => Ok(RealPathOutcome::Delivered(text)),
            Err(DeckError::Cancelled) => Err(DeckError::Cancelled),
            Err(e) => Ok(RealPathOutcome::Unavailable(e.to_string())),
        }
    }

    /// Bridge a stream of partial accumulator values into session events.
    /// The forwarder drains after the producing side drops its sender, so
    /// awaiting it orders every `Streaming` event before finalization.
    fn forward_partials(&self) -> (mpsc::UnboundedSender<String>, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            while let Some(partial) = rx.recv().await {
                let _ = events.send(SessionEvent::Streaming { partial });
            }
        });
        (tx, handle)
    }

    fn push_turn(&mut self, turn: Turn) {
        self.history.push(turn.clone());
        let _ = self.events.send(SessionEvent::TurnAdded { turn });
    }
}
