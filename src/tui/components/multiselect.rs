//! Multi-selection component with toggle support.

use std::{collections::BTreeSet, io::Write};

use anyhow::Result;
use colored::Colorize;

use super::{Prompt, PromptResult, Step, ValidationResult, drive, run_interactive};
use crate::tui::{
    keys::{Key, KeySource},
    terminal::Screen,
    theme::Theme,
};

/// An item in a multi-selection list.
#[derive(Debug, Clone)]
pub struct MultiSelectItem<T> {
    /// The value returned when this item is selected
    pub value: T,
    /// The label displayed to the user
    pub label: String,
    /// Whether this item is selected by default
    pub default_selected: bool,
}

impl<T> MultiSelectItem<T> {
    #[must_use]
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            default_selected: false,
        }
    }

    /// Sets whether this item is selected by default.
    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.default_selected = selected;
        self
    }
}

type SelectionValidator<'a, T> = Box<dyn Fn(&[&T]) -> ValidationResult + 'a>;

/// A multi-selection prompt with toggle support.
pub struct MultiSelect<'a, T> {
    message: &'a str,
    items: Vec<MultiSelectItem<T>>,
    cursor: usize,
    selected: BTreeSet<usize>,
    help_message: Option<&'a str>,
    validator: Option<SelectionValidator<'a, T>>,
    error: Option<String>,
    preceding: usize,
    theme: Theme,
}

impl<'a, T: Clone> MultiSelect<'a, T> {
    #[must_use]
    pub fn new(message: &'a str, items: Vec<MultiSelectItem<T>>) -> Self {
        let selected = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.default_selected)
            .map(|(idx, _)| idx)
            .collect();

        Self {
            message,
            items,
            cursor: 0,
            selected,
            help_message: None,
            validator: None,
            error: None,
            preceding: 0,
            theme: Theme::default(),
        }
    }

    #[must_use]
    pub fn with_help_message(mut self, message: &'a str) -> Self {
        self.help_message = Some(message);
        self
    }

    /// Rejects a submission while `validator` returns `Invalid`.
    #[must_use]
    pub fn with_validator(mut self, validator: impl Fn(&[&T]) -> ValidationResult + 'a) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    #[must_use]
    pub fn with_clear_preceding(mut self, lines: usize) -> Self {
        self.preceding = lines;
        self
    }

    /// Runs the multi-select prompt and returns the selected items' values.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(values))` - User submitted selections (possibly none)
    /// - `Ok(None)` - User cancelled with Escape
    /// - `Err(_)` - Terminal error occurred
    pub fn prompt(self) -> PromptResult<Vec<T>> {
        if self.items.is_empty() {
            return Ok(Some(Vec::new()));
        }
        run_interactive(self, |multi| Some(multi.selected_values()))
    }

    pub fn prompt_with<W: Write, K: KeySource>(
        mut self,
        screen: &mut Screen<W>,
        keys: &mut K,
    ) -> PromptResult<Vec<T>> {
        if self.items.is_empty() {
            return Ok(Some(Vec::new()));
        }
        drive(&mut self, screen, keys)
    }

    /// Values of the currently selected items, in list order.
    #[must_use]
    pub fn selected_values(&self) -> Vec<T> {
        self.selected
            .iter()
            .filter_map(|&idx| self.items.get(idx).map(|item| item.value.clone()))
            .collect()
    }

    fn toggle(&mut self, idx: usize) {
        if !self.selected.remove(&idx) {
            self.selected.insert(idx);
        }
    }

    fn toggle_all(&mut self) {
        if self.selected.len() == self.items.len() {
            self.selected.clear();
        } else {
            self.selected = (0..self.items.len()).collect();
        }
    }

    fn try_submit(&mut self) -> Step<Vec<T>> {
        if let Some(validator) = &self.validator {
            let refs: Vec<&T> = self
                .selected
                .iter()
                .filter_map(|&idx| self.items.get(idx).map(|item| &item.value))
                .collect();
            if let ValidationResult::Invalid(msg) = validator(&refs) {
                self.error = Some(msg);
                return Step::Continue;
            }
        }
        Step::Submit(self.selected_values())
    }
}

impl<T: Clone> Prompt for MultiSelect<'_, T> {
    type Output = Vec<T>;

    fn frame(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.items.len().saturating_add(3));
        lines.push(self.theme.header(self.message));

        for (idx, item) in self.items.iter().enumerate() {
            let active = idx == self.cursor;
            let pointer = if active {
                self.theme.pointer.color(self.theme.selected).to_string()
            } else {
                " ".to_string()
            };
            let bullet = if self.selected.contains(&idx) {
                self.theme.bullet_on.color(self.theme.success).to_string()
            } else {
                self.theme.bullet_off.to_string()
            };
            let color = if active {
                self.theme.selected
            } else {
                self.theme.unselected
            };
            lines.push(format!("{pointer} {bullet} {}", item.label.color(color)));
        }

        if let Some(err) = &self.error {
            lines.push(self.theme.error_line(err));
        }

        let help = self
            .help_message
            .unwrap_or("↑↓ navigate · space toggle · a all · enter submit · esc cancel");
        lines.push(self.theme.help_line(help).to_string());

        lines
    }

    fn handle_key(&mut self, key: Key) -> Result<Step<Vec<T>>> {
        let step = match key {
            Key::Up | Key::Char('k') => {
                self.cursor = if self.cursor == 0 {
                    self.items.len().saturating_sub(1)
                } else {
                    self.cursor.saturating_sub(1)
                };
                self.error = None;
                Step::Continue
            }
            Key::Down | Key::Tab | Key::Char('j') => {
                let next = self.cursor.saturating_add(1);
                self.cursor = if next >= self.items.len() { 0 } else { next };
                self.error = None;
                Step::Continue
            }
            Key::Space => {
                self.toggle(self.cursor);
                self.error = None;
                Step::Continue
            }
            Key::Char('a') => {
                self.toggle_all();
                self.error = None;
                Step::Continue
            }
            Key::Enter => self.try_submit(),
            Key::Escape | Key::Interrupt => Step::Cancel,
            _ => Step::Continue,
        };
        Ok(step)
    }

    fn summary(&self, answer: Option<&Vec<T>>) -> String {
        if answer.is_none() {
            return self.theme.cancelled(self.message);
        }

        let labels: Vec<&str> = self
            .selected
            .iter()
            .filter_map(|&idx| self.items.get(idx).map(|item| item.label.as_str()))
            .collect();

        if labels.is_empty() {
            self.theme.answered(self.message, "(none)")
        } else {
            self.theme.answered(self.message, &labels.join(", "))
        }
    }

    fn preceding_lines(&self) -> usize {
        self.preceding
    }
}
