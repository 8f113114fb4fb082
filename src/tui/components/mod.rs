//! Reusable prompt components and the render loop they share.

mod config_view;
mod confirm;
mod multiselect;
mod select;
mod text_input;

pub use config_view::{ConfigEntry, ConfigView};
pub use confirm::Confirm;
pub use multiselect::{MultiSelect, MultiSelectItem};
pub use select::{Select, SelectItem};
pub use text_input::TextInput;

use std::io::{self, Write};

use anyhow::Result;

use super::{
    keys::{Key, KeySource, TerminalKeys},
    terminal::{RawModeGuard, Screen, is_interactive},
};

/// Result of input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Input is valid
    Valid,
    /// Input is invalid with an error message
    Invalid(String),
}

impl ValidationResult {
    /// Returns true if the validation passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Empty messages count as valid.
    #[must_use]
    pub fn from_message(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self::Invalid(m),
            _ => Self::Valid,
        }
    }
}

/// Result type for prompt operations.
///
/// - `Ok(Some(value))` - User submitted a value
/// - `Ok(None)` - User cancelled (Escape or Ctrl+C)
/// - `Err(_)` - An error occurred
///
/// Cancellation is its own variant, so `Some(false)` or `Some(String::new())`
/// stay ordinary answers.
pub type PromptResult<T> = Result<Option<T>>;

/// Outcome of dispatching one key.
#[derive(Debug, PartialEq, Eq)]
pub enum Step<T> {
    Continue,
    Submit(T),
    Cancel,
}

/// An interactive widget driven by [`drive`].
pub trait Prompt {
    type Output;

    /// Lines of the current frame.
    fn frame(&self) -> Vec<String>;

    /// Applies one key to the prompt state.
    fn handle_key(&mut self, key: Key) -> Result<Step<Self::Output>>;

    /// Collapsed line written when the prompt resolves (`None` on cancel).
    fn summary(&self, answer: Option<&Self::Output>) -> String;

    /// Caller-owned lines above the prompt to erase on finish.
    fn preceding_lines(&self) -> usize {
        0
    }
}

/// Runs the render/key loop until the prompt submits or cancels.
pub fn drive<P, W, K>(prompt: &mut P, screen: &mut Screen<W>, keys: &mut K) -> PromptResult<P::Output>
where
    P: Prompt,
    W: Write,
    K: KeySource,
{
    loop {
        screen.render(&prompt.frame())?;

        let key = keys.next_key()?;
        match prompt.handle_key(key)? {
            Step::Continue => {}
            Step::Submit(value) => {
                screen.collapse(&prompt.summary(Some(&value)), prompt.preceding_lines())?;
                return Ok(Some(value));
            }
            Step::Cancel => {
                screen.collapse(&prompt.summary(None), prompt.preceding_lines())?;
                return Ok(None);
            }
        }
    }
}

/// Runs `prompt` on the real terminal, or returns `fallback()` when stdin or
/// stdout is not a TTY.
pub(crate) fn run_interactive<P, F>(mut prompt: P, fallback: F) -> PromptResult<P::Output>
where
    P: Prompt,
    F: FnOnce(P) -> Option<P::Output>,
{
    if !is_interactive() {
        return Ok(fallback(prompt));
    }

    let guard = RawModeGuard::acquire()?;
    let mut keys = TerminalKeys::new(guard.interrupt_flag());
    let mut screen = Screen::new(io::stdout());

    let result = drive(&mut prompt, &mut screen, &mut keys);
    guard.release()?;
    result
}

/// Pads `text` with spaces to `width` characters.
pub(crate) fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
