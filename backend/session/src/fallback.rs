//! Simulated fallback responder.
//!
//! Substitutes a deterministic, network-free reply when the configured
//! endpoint cannot be reached, revealed character by character to keep the
//! streaming display contract of the real path.

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tracing::debug;

const GREETING_REPLY: &str = "Hello! I'm running as a simulated local LLM since I couldn't \
connect to your Llama 3 instance. How can I help you today?";

const HELP_REPLY: &str = "I'm here to help! You can ask me questions, request information, \
or use prompts to guide our conversation. Try typing '/prompt' to access your saved \
prompts. Note: I'm currently running in simulation mode since I couldn't connect to your \
local LLM.";

const MODEL_REPLY: &str = "Llama 3 is Meta's latest open language model. To use the actual \
model instead of this simulation, you'll need to run Llama 3 locally using a framework \
like llama.cpp or through an API server, then configure the endpoint in the settings.";

const PROMPT_REPLY: &str = "I see you're interested in prompts! You can access your saved \
prompts by typing '/prompt' or '/p' followed by the prompt name. You can also press \
Ctrl+Space to open the prompt sidebar.";

const GENERIC_REPLY: &str = "I'm currently running in simulation mode since I couldn't \
connect to your local LLM. To use the actual Llama 3 model, please make sure it's running \
locally and configure the endpoint in settings. What else would you like to know?";

/// Pick the canned reply for a user input.
///
/// Case-insensitive substring checks in fixed priority order: greeting,
/// help, model name, prompt feature, generic. An input matching several
/// categories gets the highest-priority one.
pub fn classify(input: &str) -> &'static str {
    let lower = input.to_lowercase();
    if lower.contains("hello") || lower.contains("hi") {
        GREETING_REPLY
    } else if lower.contains("help") {
        HELP_REPLY
    } else if lower.contains("llama") || lower.contains("model") {
        MODEL_REPLY
    } else if lower.contains("prompt") {
        PROMPT_REPLY
    } else {
        GENERIC_REPLY
    }
}

/// Per-character delay used while revealing a simulated reply.
#[derive(Debug, Clone)]
pub struct TypingCadence {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for TypingCadence {
    fn default() -> Self {
        // 10-30ms per character reads like live token generation.
        Self {
            min_delay_ms: 10,
            max_delay_ms: 30,
        }
    }
}

impl TypingCadence {
    /// No delay at all, for deterministic tests.
    pub fn instant() -> Self {
        Self {
            min_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    fn delay(&self) -> Duration {
        if self.max_delay_ms <= self.min_delay_ms {
            return Duration::from_millis(self.min_delay_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms);
        Duration::from_millis(ms)
    }
}

/// Generates the simulated reply for a user input, emitting a partial
/// update after every revealed character.
#[derive(Debug, Clone, Default)]
pub struct SimulatedResponder {
    cadence: TypingCadence,
}

impl SimulatedResponder {
    pub fn new(cadence: TypingCadence) -> Self {
        Self { cadence }
    }

    /// Reveal the classified reply one character at a time. Completes
    /// unconditionally once started; returns the full reply text.
    pub async fn respond(
        &self,
        user_input: &str,
        partials: &mpsc::UnboundedSender<String>,
    ) -> String {
        let reply = classify(user_input);
        debug!(chars = reply.len(), "Simulating streamed reply");

        let mut revealed = String::new();
        for ch in reply.chars() {
            revealed.push(ch);
            let _ = partials.send(revealed.clone());
            let delay = self.cadence.delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        reply.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_wins_over_help() {
        // Priority order is fixed: an input matching both categories
        // gets the greeting template.
        assert_eq!(classify("hello, can you help me?"), GREETING_REPLY);
    }

    #[test]
    fn hello_yields_simulated_greeting() {
        assert!(classify("hello").starts_with("Hello! I'm running as a simulated local LLM"));
    }

    #[test]
    fn categories_resolve_in_order() {
        assert_eq!(classify("HELP please"), HELP_REPLY);
        assert_eq!(classify("tell me about llama"), MODEL_REPLY);
        assert_eq!(classify("what model are you"), MODEL_REPLY);
        assert_eq!(classify("does a saved prompt work"), PROMPT_REPLY);
        assert_eq!(classify("tell me a story"), GENERIC_REPLY);
    }

    #[test]
    fn greeting_matches_hi_as_substring() {
        // "hi" is a plain substring check, so it also fires inside words.
        assert_eq!(classify("this is fine"), GREETING_REPLY);
    }

    #[tokio::test]
    async fn reveals_one_partial_per_character() {
        let responder = SimulatedResponder::new(TypingCadence::instant());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let reply = responder.respond("tell me a story", &tx).await;

        assert_eq!(reply, GENERIC_REPLY);
        let mut partials = Vec::new();
        while let Ok(partial) = rx.try_recv() {
            partials.push(partial);
        }
        assert_eq!(partials.len(), GENERIC_REPLY.chars().count());
        assert_eq!(partials.first().unwrap(), "I");
        assert_eq!(partials.last().unwrap(), GENERIC_REPLY);
    }
}
