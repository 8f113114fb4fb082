//! The interactive surface the workflows talk to.

use anyhow::Result;

use crate::editor;
use crate::tui::{
    MultiSelectItem, PromptResult, SelectItem, ShortcutOptions, ValidationResult, confirm_prompt,
    multiselect_prompt, select_prompt, text_prompt,
};

/// Returns an error message for invalid input, `None` when acceptable.
pub type TextCheck<'a> = &'a dyn Fn(&str) -> Option<String>;

pub trait Prompter {
    fn select<T: Clone + PartialEq>(
        &mut self,
        message: &str,
        items: Vec<SelectItem<T>>,
        initial: Option<&T>,
        shortcuts: Option<ShortcutOptions<'_>>,
    ) -> PromptResult<T>;

    fn text(
        &mut self,
        message: &str,
        placeholder: Option<&str>,
        initial: Option<&str>,
        check: TextCheck<'_>,
    ) -> PromptResult<String>;

    fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool>;

    fn multiselect<T: Clone>(
        &mut self,
        message: &str,
        items: Vec<MultiSelectItem<T>>,
    ) -> PromptResult<Vec<T>>;

    /// Opens `initial` in an external editor.
    fn edit(&mut self, initial: &str, instructions: &str) -> Result<String>;

    /// Prints a line that is not part of any prompt.
    fn note(&mut self, line: &str) {
        println!("{line}");
    }
}

/// [`Prompter`] backed by the inline terminal prompts.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select<T: Clone + PartialEq>(
        &mut self,
        message: &str,
        items: Vec<SelectItem<T>>,
        initial: Option<&T>,
        shortcuts: Option<ShortcutOptions<'_>>,
    ) -> PromptResult<T> {
        select_prompt(message, items, initial, shortcuts)
    }

    fn text(
        &mut self,
        message: &str,
        placeholder: Option<&str>,
        initial: Option<&str>,
        check: TextCheck<'_>,
    ) -> PromptResult<String> {
        text_prompt(
            message,
            placeholder,
            initial,
            Some(|value: &str| Ok(ValidationResult::from_message(check(value)))),
        )
    }

    fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool> {
        confirm_prompt(message, default)
    }

    fn multiselect<T: Clone>(
        &mut self,
        message: &str,
        items: Vec<MultiSelectItem<T>>,
    ) -> PromptResult<Vec<T>> {
        multiselect_prompt(message, items)
    }

    fn edit(&mut self, initial: &str, instructions: &str) -> Result<String> {
        editor::edit_text(initial, instructions)
    }
}
