//! Inline terminal prompts.
//!
//! Prompts render below the cursor without an alternate screen and collapse
//! to a single summary line once answered, so a multi-step wizard leaves a
//! compact transcript:
//! - `Select` - Single selection with optional letter shortcuts
//! - `MultiSelect` - Multiple selection with toggle
//! - `TextInput` - Single-line text with validation
//! - `Confirm` - Yes/no select

pub mod components;
pub mod keys;
mod prompts;
pub mod terminal;
mod theme;

pub use components::{
    ConfigEntry, ConfigView, Confirm, MultiSelect, MultiSelectItem, PromptResult, Select,
    SelectItem, TextInput, ValidationResult,
};
pub use prompts::{
    ShortcutOptions, confirm_prompt, multiselect_prompt, select_prompt, text_prompt,
};
pub use theme::Theme;
