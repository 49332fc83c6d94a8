/// Slash-trigger detection: identify `/prompt` and `/p` lookups in the
/// chat input so the caller can surface matching saved prompts.
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

static PROMPT_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/prompt\s*(.*)$").unwrap());
static SHORT_TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/p\s*(.*)$").unwrap());
static TRIGGER_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/prompt\s*.*$|/p\s*.*$").unwrap());

/// A detected trigger: everything after the alias is the filter query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch {
    pub query: String,
}

/// Detect a prompt trigger in the input text.
///
/// The long alias is checked before the short one, so `/prompt rev` is a
/// `/prompt` lookup with query `"rev"` rather than a `/p` lookup with a
/// mangled query. Returns `None` when no trigger is present.
pub fn detect_trigger(input: &str) -> Option<TriggerMatch> {
    let captures = PROMPT_TRIGGER
        .captures(input)
        .or_else(|| SHORT_TRIGGER.captures(input))?;
    Some(TriggerMatch {
        query: captures.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
    })
}

/// Replace the trigger suffix of `input` with the selected prompt content.
/// Input without a trigger is returned unchanged.
pub fn insert_prompt(input: &str, content: &str) -> String {
    TRIGGER_SPAN.replace(input, NoExpand(content)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_both_aliases() {
        assert_eq!(
            detect_trigger("/prompt review").unwrap().query,
            "review"
        );
        assert_eq!(detect_trigger("/p review").unwrap().query, "review");
    }

    #[test]
    fn long_alias_wins_over_short_prefix() {
        assert_eq!(detect_trigger("/prompt rev").unwrap().query, "rev");
    }

    #[test]
    fn bare_trigger_has_empty_query() {
        assert_eq!(detect_trigger("/prompt").unwrap().query, "");
        assert_eq!(detect_trigger("/p").unwrap().query, "");
    }

    #[test]
    fn trigger_fires_mid_text() {
        let found = detect_trigger("summarize this /p bug").unwrap();
        assert_eq!(found.query, "bug");
    }

    #[test]
    fn plain_text_is_not_a_trigger() {
        assert!(detect_trigger("tell me about rust").is_none());
        assert!(detect_trigger("").is_none());
    }

    #[test]
    fn insert_replaces_trigger_suffix() {
        assert_eq!(
            insert_prompt("please /prompt review", "Review the following code"),
            "please Review the following code"
        );
        assert_eq!(
            insert_prompt("please /p rev", "Review the following code"),
            "please Review the following code"
        );
    }

    #[test]
    fn insert_without_trigger_is_unchanged() {
        assert_eq!(insert_prompt("no trigger here", "content"), "no trigger here");
    }
}
