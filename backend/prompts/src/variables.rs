/// `[VAR_NAME]` placeholder extraction and substitution for prompt
/// templates. No escaping or nesting rules; a placeholder is exactly an
/// uppercase name in square brackets.
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([A-Z_]+)\]").unwrap());

/// Distinct placeholder names in first-occurrence order.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in VARIABLE.captures_iter(content) {
        let name = captures[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Replace every `[NAME]` with its mapped value. Names that are missing
/// from the map, or mapped to an empty value, keep their placeholder.
pub fn fill_variables(content: &str, values: &HashMap<String, String>) -> String {
    VARIABLE
        .replace_all(content, |captures: &Captures| {
            match values.get(&captures[1]) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => captures[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_first_occurrence_order() {
        let content = "As a [USER_TYPE], I want to [ACTION] so that [BENEFIT]. [USER_TYPE]!";
        assert_eq!(
            extract_variables(content),
            vec!["USER_TYPE", "ACTION", "BENEFIT"]
        );
    }

    #[test]
    fn lowercase_brackets_are_not_variables() {
        assert_eq!(extract_variables("see [notes] and [TODO_LIST]"), vec!["TODO_LIST"]);
    }

    #[test]
    fn fills_mapped_values() {
        let mut values = HashMap::new();
        values.insert("USER_TYPE".to_string(), "developer".to_string());
        values.insert("ACTION".to_string(), "ship".to_string());

        let filled = fill_variables("As a [USER_TYPE], I want to [ACTION]", &values);
        assert_eq!(filled, "As a developer, I want to ship");
    }

    #[test]
    fn missing_or_empty_values_keep_the_placeholder() {
        let mut values = HashMap::new();
        values.insert("ACTION".to_string(), String::new());

        let filled = fill_variables("[USER_TYPE] will [ACTION]", &values);
        assert_eq!(filled, "[USER_TYPE] will [ACTION]");
    }

    #[test]
    fn repeated_placeholders_all_fill() {
        let mut values = HashMap::new();
        values.insert("NAME".to_string(), "Ada".to_string());

        let filled = fill_variables("[NAME] and [NAME]", &values);
        assert_eq!(filled, "Ada and Ada");
    }
}
