use serde::{Deserialize, Serialize};

use crate::types::Turn;

/// Events emitted by a session while a submission is in flight.
///
/// Delivered through an unbounded sender so a slow display never stalls
/// the stream read loop. A closed receiver is tolerated: generation
/// still runs to completion and the finalized turn lands in the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Updated accumulator value for the turn currently being generated.
    Streaming { partial: String },
    /// A turn was appended to the session history.
    TurnAdded { turn: Turn },
    /// The configured endpoint could not be reached; the simulated
    /// fallback was substituted. Emitted at most once per submission.
    EndpointUnreachable { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_by_type() {
        let event = SessionEvent::Streaming {
            partial: "Hel".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "streaming");
        assert_eq!(json["partial"], "Hel");

        let event = SessionEvent::EndpointUnreachable {
            reason: "HTTP 503".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "endpoint_unreachable");
    }
}
