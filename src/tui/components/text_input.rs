//! Text input component with validation support.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use super::{Prompt, PromptResult, Step, ValidationResult, drive, run_interactive};
use crate::tui::{
    keys::{Key, KeySource},
    terminal::Screen,
    theme::Theme,
};

type TextValidator<'a> = Box<dyn Fn(&str) -> Result<ValidationResult> + 'a>;

/// A single-line text prompt with optional validation.
///
/// The whole line is redrawn on every key; the caret is the character shown
/// in inverse video.
pub struct TextInput<'a> {
    message: &'a str,
    placeholder: Option<&'a str>,
    initial_value: Option<String>,
    buffer: Vec<char>,
    caret: usize,
    validator: Option<TextValidator<'a>>,
    error: Option<String>,
    preceding: usize,
    theme: Theme,
}

impl<'a> TextInput<'a> {
    #[must_use]
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            placeholder: None,
            initial_value: None,
            buffer: Vec::new(),
            caret: 0,
            validator: None,
            error: None,
            preceding: 0,
            theme: Theme::default(),
        }
    }

    /// Dimmed text shown while the buffer is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Pre-fills the buffer with the caret at the end.
    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.buffer = value.chars().collect();
        self.caret = self.buffer.len();
        self.initial_value = Some(value);
        self
    }

    /// Runs `validator` on Enter; an `Invalid` result keeps the prompt open.
    /// Errors returned by the validator abort the prompt unchanged.
    #[must_use]
    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> Result<ValidationResult> + 'a,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    #[must_use]
    pub fn with_clear_preceding(mut self, lines: usize) -> Self {
        self.preceding = lines;
        self
    }

    /// Runs the text input prompt and returns the user's input.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))` - User submitted text (possibly empty)
    /// - `Ok(None)` - User cancelled with Escape / Ctrl+C
    /// - `Err(_)` - Terminal or validator error
    pub fn prompt(self) -> PromptResult<String> {
        run_interactive(self, |text| Some(text.fallback()))
    }

    pub fn prompt_with<W: Write, K: KeySource>(
        mut self,
        screen: &mut Screen<W>,
        keys: &mut K,
    ) -> PromptResult<String> {
        drive(&mut self, screen, keys)
    }

    /// Non-TTY answer: the initial value or an empty string, unvalidated.
    #[must_use]
    pub fn fallback(&self) -> String {
        self.initial_value.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn value(&self) -> String {
        self.buffer.iter().collect()
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    fn insert(&mut self, c: char) {
        self.buffer.insert(self.caret, c);
        self.caret = self.caret.saturating_add(1);
    }

    fn render_input(&self) -> String {
        if self.buffer.is_empty()
            && let Some(placeholder) = self.placeholder
        {
            let mut chars = placeholder.chars();
            let first = chars.next().map_or_else(|| " ".to_string(), String::from);
            let rest: String = chars.collect();
            return format!(
                "{}{}",
                first.color(self.theme.help).reversed(),
                rest.color(self.theme.help)
            );
        }

        let mut out = String::new();
        for (idx, c) in self.buffer.iter().enumerate() {
            if idx == self.caret {
                out.push_str(&c.to_string().reversed().to_string());
            } else {
                out.push(*c);
            }
        }
        if self.caret >= self.buffer.len() {
            out.push_str(&" ".reversed().to_string());
        }
        out
    }

    fn submit(&mut self) -> Result<Step<String>> {
        let value = self.value();
        if let Some(validator) = &self.validator
            && let ValidationResult::Invalid(msg) = validator(&value)?
        {
            self.error = Some(msg);
            return Ok(Step::Continue);
        }
        Ok(Step::Submit(value))
    }
}

impl Prompt for TextInput<'_> {
    type Output = String;

    fn frame(&self) -> Vec<String> {
        let mut lines = vec![
            self.theme.header(self.message),
            format!(
                "{} {}",
                self.theme.pointer.color(self.theme.title),
                self.render_input()
            ),
        ];
        if let Some(err) = &self.error {
            lines.push(self.theme.error_line(err));
        }
        lines
    }

    fn handle_key(&mut self, key: Key) -> Result<Step<String>> {
        let step = match key {
            Key::Enter => return self.submit(),
            Key::Escape | Key::Interrupt => Step::Cancel,
            Key::Left => {
                self.caret = self.caret.saturating_sub(1);
                Step::Continue
            }
            Key::Right => {
                self.caret = self.caret.saturating_add(1).min(self.buffer.len());
                Step::Continue
            }
            Key::Home => {
                self.caret = 0;
                Step::Continue
            }
            Key::End => {
                self.caret = self.buffer.len();
                Step::Continue
            }
            Key::Backspace => {
                if self.caret > 0 {
                    self.caret = self.caret.saturating_sub(1);
                    self.buffer.remove(self.caret);
                }
                self.error = None;
                Step::Continue
            }
            Key::Delete => {
                if self.caret < self.buffer.len() {
                    self.buffer.remove(self.caret);
                }
                self.error = None;
                Step::Continue
            }
            Key::Space => {
                self.insert(' ');
                self.error = None;
                Step::Continue
            }
            Key::Char(c) if u32::from(c) >= 32 && !c.is_control() => {
                self.insert(c);
                self.error = None;
                Step::Continue
            }
            _ => Step::Continue,
        };
        Ok(step)
    }

    fn summary(&self, answer: Option<&String>) -> String {
        match answer {
            Some(value) => self.theme.answered(self.message, value),
            None => self.theme.cancelled(self.message),
        }
    }

    fn preceding_lines(&self) -> usize {
        self.preceding
    }
}
