//! Interactive chat loop.
//!
//! Streams assistant replies to the terminal as they generate, surfaces
//! prompt-trigger suggestions inline, and falls back to simulation mode
//! when the configured endpoint is unreachable.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use promptdeck_core::{ModelConfig, Role, SessionEvent};
use promptdeck_llm::OpenAiCompatClient;
use promptdeck_prompts::{detect_trigger, insert_prompt, PromptStore};
use promptdeck_session::ConversationSession;

pub async fn run_chat(config: ModelConfig) -> Result<()> {
    let store = PromptStore::with_builtins();
    let backend = OpenAiCompatClient::new(&config);

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut session = ConversationSession::new(events_tx);

    let printer = tokio::spawn(print_events(events_rx));

    if let Some(greeting) = session.history().first() {
        println!("assistant: {}", greeting.content);
    }
    println!("(type '/prompt <query>' or '/p <query>' to search saved prompts, '/quit' to exit)");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" || line.trim() == "/exit" {
            break;
        }

        let input = match expand_trigger(&line, &store, &mut lines).await? {
            Some(input) => input,
            None => continue,
        };

        session
            .submit_turn(&backend, &config, &input, CancellationToken::new())
            .await?;
    }

    drop(session);
    let _ = printer.await;
    Ok(())
}

/// When the input ends in a prompt trigger, list the matching prompts and
/// let the user pick one to splice in. Returns the text to submit, or
/// `None` to go back to the input loop.
async fn expand_trigger(
    line: &str,
    store: &PromptStore,
    lines: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
) -> Result<Option<String>> {
    let Some(trigger) = detect_trigger(line) else {
        return Ok(Some(line.to_string()));
    };

    let matches = store.filter(trigger.query.trim());
    if matches.is_empty() {
        println!("No matching prompts found. Type a different query.");
        return Ok(None);
    }

    for (index, prompt) in matches.iter().enumerate() {
        let star = if prompt.favorite { "*" } else { " " };
        println!("  {}{star} {} - {}", index + 1, prompt.title, prompt.description);
    }
    print!("select a prompt (enter to cancel): ");
    std::io::stdout().flush()?;

    let Some(choice) = lines.next_line().await? else {
        return Ok(None);
    };
    match parse_selection(&choice, matches.len()) {
        Some(index) => Ok(Some(insert_prompt(line, &matches[index].content))),
        None => Ok(None),
    }
}

/// 1-based selection from a printed list; anything else cancels.
fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let picked: usize = input.trim().parse().ok()?;
    (1..=len).contains(&picked).then(|| picked - 1)
}

async fn print_events(mut events: mpsc::UnboundedReceiver<SessionEvent>) {
    // Byte offset of the partial text already on screen; partials only
    // ever extend, so the unseen suffix is a clean slice.
    let mut shown = 0usize;

    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Streaming { partial } => {
                if shown == 0 {
                    print!("assistant: ");
                }
                if let Some(fresh) = partial.get(shown..) {
                    print!("{fresh}");
                    shown = partial.len();
                }
                let _ = std::io::stdout().flush();
            }
            SessionEvent::TurnAdded { turn } if turn.role == Role::Assistant => {
                if shown == 0 {
                    println!("assistant: {}", turn.content);
                } else {
                    println!();
                }
                shown = 0;
            }
            SessionEvent::TurnAdded { .. } => {}
            SessionEvent::EndpointUnreachable { reason } => {
                if shown > 0 {
                    println!();
                    shown = 0;
                }
                println!("[offline] {reason} - replying in simulation mode");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_one_based_and_bounded() {
        assert_eq!(parse_selection("1", 3), Some(0));
        assert_eq!(parse_selection(" 3 ", 3), Some(2));
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("", 3), None);
        assert_eq!(parse_selection("abc", 3), None);
    }
}
