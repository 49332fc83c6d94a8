//! Server-Sent-Events response consumer.
//!
//! Decodes a byte stream of `data: <json>\n` frames into an incremental
//! text accumulator, emitting each updated value as fragments arrive.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use promptdeck_core::DeckError;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Body of one streamed completion chunk:
/// `{"choices":[{"delta":{"content":"<fragment>"}}]}`.
#[derive(Debug, Deserialize)]
struct ChunkBody {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Drain an SSE-framed byte stream into a text accumulator.
///
/// Every time a delta fragment arrives, the updated accumulator value is
/// pushed into `partials`; the final accumulated text is returned when the
/// stream ends, either via the `data: [DONE]` sentinel or by closure.
/// Zero fragments is a valid outcome (the final text is empty).
///
/// Malformed `data:` lines are skipped with a log line, never an error.
/// A transport-level read error mid-stream ends the whole read as
/// [`DeckError::Transport`].
pub async fn consume_sse_stream<S, E>(
    mut stream: S,
    partials: &mpsc::UnboundedSender<String>,
) -> Result<String, DeckError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut accumulator = String::new();
    let mut carry = String::new();
    let mut terminated = false;

    'read: while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| DeckError::Transport(format!("stream read failed: {e}")))?;
        let text = String::from_utf8_lossy(&chunk);

        // A frame may straddle chunk boundaries; hold the unterminated
        // tail until the rest of the line arrives.
        let buffered = format!("{carry}{text}");
        let mut lines: Vec<&str> = buffered.split('\n').collect();
        carry = lines.pop().unwrap_or_default().to_string();

        for line in lines {
            match parse_frame(line.trim_end_matches('\r')) {
                Frame::Delta(fragment) => {
                    accumulator.push_str(&fragment);
                    let _ = partials.send(accumulator.clone());
                }
                Frame::Done => {
                    debug!("SSE stream completed via [DONE] sentinel");
                    terminated = true;
                    break 'read;
                }
                Frame::Skip => {}
            }
        }
    }

    // Closure without [DONE] can leave one complete frame unterminated.
    if !terminated {
        if let Frame::Delta(fragment) = parse_frame(carry.trim_end_matches('\r')) {
            accumulator.push_str(&fragment);
            let _ = partials.send(accumulator.clone());
        }
    }

    Ok(accumulator)
}

enum Frame {
    Delta(String),
    Done,
    Skip,
}

fn parse_frame(line: &str) -> Frame {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    if payload == DONE_SENTINEL {
        return Frame::Done;
    }
    match serde_json::from_str::<ChunkBody>(payload) {
        Ok(body) => match body.choices.into_iter().next().and_then(|c| c.delta.content) {
            Some(fragment) if !fragment.is_empty() => Frame::Delta(fragment),
            _ => Frame::Skip,
        },
        Err(e) => {
            warn!(error = %e, "Skipping malformed SSE line");
            Frame::Skip
        }
    }
}
