pub mod library;
pub mod trigger;
pub mod variables;

pub use library::{Prompt, PromptStore};
pub use trigger::{detect_trigger, insert_prompt, TriggerMatch};
pub use variables::{extract_variables, fill_variables};
