//! In-memory prompt library.
//!
//! Holds the saved prompt records the chat surfaces look up via triggers
//! and sidebars. Insertion order is preserved because it is the order
//! suggestions are shown in. No persistence; the built-in set seeds every
//! store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub tags: Vec<String>,
    pub folder: String,
    pub favorite: bool,
}

impl Prompt {
    /// Create a prompt with a fresh id and no tags.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            content: content.into(),
            tags: Vec::new(),
            folder: folder.into(),
            favorite: false,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Case-insensitive match against title or any tag.
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&query))
    }
}

/// The in-memory prompt collection.
#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    prompts: Vec<Prompt>,
}

impl PromptStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store seeded with the built-in prompt set.
    pub fn with_builtins() -> Self {
        Self {
            prompts: builtin_prompts(),
        }
    }

    pub fn all(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    pub fn add(&mut self, prompt: Prompt) {
        self.prompts.push(prompt);
    }

    /// Replace the prompt with the same id. Returns false when the id is
    /// unknown.
    pub fn update(&mut self, prompt: Prompt) -> bool {
        match self.prompts.iter_mut().find(|p| p.id == prompt.id) {
            Some(slot) => {
                *slot = prompt;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.prompts.len();
        self.prompts.retain(|p| p.id != id);
        self.prompts.len() != before
    }

    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        match self.prompts.iter_mut().find(|p| p.id == id) {
            Some(prompt) => {
                prompt.favorite = !prompt.favorite;
                true
            }
            None => false,
        }
    }

    /// Distinct folder names in insertion order.
    pub fn folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = Vec::new();
        for prompt in &self.prompts {
            if !folders.contains(&prompt.folder) {
                folders.push(prompt.folder.clone());
            }
        }
        folders
    }

    /// Prompts matching the query on title or tags, in insertion order.
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Prompt> {
        self.prompts.iter().filter(|p| p.matches(query)).collect()
    }

    /// Same as [`filter`](Self::filter), restricted to favorites.
    pub fn filter_favorites(&self, query: &str) -> Vec<&Prompt> {
        self.prompts
            .iter()
            .filter(|p| p.favorite && p.matches(query))
            .collect()
    }

    pub fn in_folder(&self, folder: &str) -> Vec<&Prompt> {
        self.prompts.iter().filter(|p| p.folder == folder).collect()
    }
}

fn builtin_prompts() -> Vec<Prompt> {
    vec![
        Prompt {
            id: "1".to_string(),
            title: "Product Requirements Template".to_string(),
            description: "Template for creating standardized product requirements documents"
                .to_string(),
            content: "# Product Requirements Document\n\n## Overview\n[Brief description of \
the product]\n\n## User Stories\n- As a [user type], I want to [action] so that \
[benefit]\n\n## Functional Requirements\n1. [Requirement 1]\n2. [Requirement 2]\n\n## \
Non-Functional Requirements\n1. [NFR 1]\n2. [NFR 2]\n\n## Acceptance Criteria\n- \
[Criteria 1]\n- [Criteria 2]"
                .to_string(),
            tags: vec!["product".to_string(), "documentation".to_string()],
            folder: "work".to_string(),
            favorite: true,
        },
        Prompt {
            id: "2".to_string(),
            title: "Code Review Prompt".to_string(),
            description: "Prompt for requesting thorough code reviews".to_string(),
            content: "Please review the following code for:\n\n1. Potential bugs or edge \
cases\n2. Performance optimizations\n3. Readability and maintainability\n4. Security \
vulnerabilities\n5. Adherence to best practices\n\nCode:\n```\n[Paste code \
here]\n```\n\nPlease provide specific suggestions for improvement with examples where \
applicable."
                .to_string(),
            tags: vec!["development".to_string(), "code".to_string()],
            folder: "work".to_string(),
            favorite: false,
        },
        Prompt {
            id: "3".to_string(),
            title: "Research Summary Template".to_string(),
            description: "Template for summarizing research findings".to_string(),
            content: "# Research Summary\n\n## Key Findings\n- [Finding 1]\n- [Finding 2]\n- \
[Finding 3]\n\n## Methodology\n[Methodology description]\n\n## Data Analysis\n[Data \
analysis summary]\n\n## Conclusions\n[Main conclusions]\n\n## Recommendations\n1. \
[Recommendation 1]\n2. [Recommendation 2]"
                .to_string(),
            tags: vec!["research".to_string(), "analysis".to_string()],
            folder: "personal".to_string(),
            favorite: true,
        },
        Prompt {
            id: "4".to_string(),
            title: "Bug Report Template".to_string(),
            description: "Standardized format for reporting software bugs".to_string(),
            content: "## Bug Report\n\n### Environment\n- Browser/Device: \
[Browser/Device]\n- OS: [Operating System]\n- Version: [App Version]\n\n### Steps to \
Reproduce\n1. [Step 1]\n2. [Step 2]\n3. [Step 3]\n\n### Expected Behavior\n[Expected \
behavior]\n\n### Actual Behavior\n[Actual behavior]\n\n### Screenshots/Videos\n[Attach \
media]\n\n### Additional Context\n[Any additional information]"
                .to_string(),
            tags: vec!["development".to_string(), "qa".to_string()],
            folder: "work".to_string(),
            favorite: false,
        },
        Prompt {
            id: "5".to_string(),
            title: "Creative Writing Starter".to_string(),
            description: "Prompt to overcome writer's block".to_string(),
            content: "Write a story with the following elements:\n\n- Main character: \
[Character description]\n- Setting: [Setting description]\n- Conflict: [Conflict \
description]\n- Theme: [Theme]\n\nBegin with an engaging opening paragraph that \
establishes the tone and introduces the main character."
                .to_string(),
            tags: vec!["writing".to_string(), "creative".to_string()],
            folder: "personal".to_string(),
            favorite: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_seed_five_prompts() {
        let store = PromptStore::with_builtins();
        assert_eq!(store.all().len(), 5);
        assert_eq!(store.folders(), vec!["work", "personal"]);
    }

    #[test]
    fn filter_matches_title_case_insensitively() {
        let store = PromptStore::with_builtins();
        let hits = store.filter("CODE REVIEW");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Code Review Prompt");
    }

    #[test]
    fn filter_matches_tags_too() {
        let store = PromptStore::with_builtins();
        let hits = store.filter("development");
        let titles: Vec<_> = hits.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Code Review Prompt", "Bug Report Template"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let store = PromptStore::with_builtins();
        assert_eq!(store.filter("").len(), 5);
    }

    #[test]
    fn favorites_filter_is_a_subset() {
        let store = PromptStore::with_builtins();
        assert_eq!(store.filter_favorites("").len(), 3);
        assert!(store.filter_favorites("").iter().all(|p| p.favorite));
    }

    #[test]
    fn crud_round_trip() {
        let mut store = PromptStore::with_builtins();

        let prompt = Prompt::new("Standup Notes", "Daily standup format", "Yesterday / Today / Blockers", "work")
            .with_tags(["meetings"]);
        let id = prompt.id.clone();
        store.add(prompt);
        assert_eq!(store.all().len(), 6);
        assert!(store.get(&id).is_some());

        let mut updated = store.get(&id).cloned().unwrap();
        updated.title = "Standup Format".to_string();
        assert!(store.update(updated));
        assert_eq!(store.get(&id).unwrap().title, "Standup Format");

        assert!(store.toggle_favorite(&id));
        assert!(store.get(&id).unwrap().favorite);
        assert!(store.toggle_favorite(&id));
        assert!(!store.get(&id).unwrap().favorite);

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert_eq!(store.all().len(), 5);
    }

    #[test]
    fn update_with_unknown_id_is_rejected() {
        let mut store = PromptStore::empty();
        assert!(!store.update(Prompt::new("x", "y", "z", "work")));
    }
}
