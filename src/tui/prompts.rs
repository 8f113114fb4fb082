//! High-level prompt functions used by the command workflows.

use std::collections::BTreeMap;

use anyhow::Result;
use log::debug;

use super::components::{
    Confirm, MultiSelect, MultiSelectItem, PromptResult, Select, SelectItem, TextInput,
    ValidationResult,
};
use crate::shortcuts::auto_assign;

/// Shortcut settings for one select prompt.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutOptions<'a> {
    /// Configured key -> option value pairs
    pub mapping: &'a BTreeMap<String, String>,
    /// Render `[k]` next to each row
    pub display_hints: bool,
}

/// Single-selection prompt.
///
/// # Arguments
///
/// * `message` - The prompt header
/// * `items` - Options in display order
/// * `initial` - Value the cursor starts on (also the non-TTY answer)
/// * `shortcuts` - Letter shortcuts; unconfigured options get auto-assigned letters
///
/// # Returns
///
/// - `Ok(Some(value))` - The chosen value
/// - `Ok(None)` - User cancelled
/// - `Err(_)` - Terminal error
///
/// # Example
///
/// ```ignore
/// let items = vec![
///     SelectItem::new("feat", "feat").with_hint("A new feature"),
///     SelectItem::new("fix", "fix").with_hint("A bug fix"),
/// ];
/// let choice = select_prompt("Select commit type:", items, None, None)?;
/// ```
pub fn select_prompt<T>(
    message: &str,
    items: Vec<SelectItem<T>>,
    initial: Option<&T>,
    shortcuts: Option<ShortcutOptions<'_>>,
) -> PromptResult<T>
where
    T: Clone + PartialEq,
{
    let keys: Vec<String> = items.iter().map(|item| item.key.clone()).collect();
    let mut prompt = Select::new(message, items);

    if let Some(value) = initial {
        prompt = prompt.with_initial_value(value);
    }

    if let Some(options) = shortcuts {
        let mapping = auto_assign(&keys, options.mapping);
        debug!("{} shortcuts resolved for '{message}'", mapping.len());
        prompt = prompt.with_shortcuts(mapping, options.display_hints);
    }

    prompt.prompt()
}

/// Single-line text prompt.
///
/// # Returns
///
/// - `Ok(Some(text))` - Submitted (and validated) text
/// - `Ok(None)` - User cancelled
/// - `Err(_)` - Terminal error, or an error returned by `validator`
///
/// # Example
///
/// ```ignore
/// let subject = text_prompt(
///     "Subject:",
///     Some("short summary"),
///     None,
///     Some(|s: &str| Ok(if s.is_empty() {
///         ValidationResult::Invalid("Subject cannot be empty".into())
///     } else {
///         ValidationResult::Valid
///     })),
/// )?;
/// ```
pub fn text_prompt<V>(
    message: &str,
    placeholder: Option<&str>,
    initial: Option<&str>,
    validator: Option<V>,
) -> PromptResult<String>
where
    V: Fn(&str) -> Result<ValidationResult>,
{
    let mut prompt = TextInput::new(message);

    if let Some(p) = placeholder {
        prompt = prompt.with_placeholder(p);
    }

    if let Some(value) = initial {
        prompt = prompt.with_initial_value(value);
    }

    if let Some(v) = validator {
        prompt = prompt.with_validator(v);
    }

    prompt.prompt()
}

/// Yes/no prompt with `default` listed first.
pub fn confirm_prompt(message: &str, default: bool) -> PromptResult<bool> {
    Confirm::new(message, default).prompt()
}

/// Multi-selection prompt; an empty selection is a valid answer.
pub fn multiselect_prompt<T: Clone>(
    message: &str,
    items: Vec<MultiSelectItem<T>>,
) -> PromptResult<Vec<T>> {
    MultiSelect::new(message, items).prompt()
}
