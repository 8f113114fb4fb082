//! Single selection component.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use super::{Prompt, PromptResult, Step, drive, pad, run_interactive};
use crate::{
    shortcuts::{ShortcutMapping, match_key},
    tui::{
        keys::{Key, KeySource},
        terminal::Screen,
        theme::Theme,
    },
};

/// An item in a selection list.
#[derive(Debug, Clone)]
pub struct SelectItem<T> {
    /// The value returned when this item is selected
    pub value: T,
    /// The label displayed to the user
    pub label: String,
    /// Text shortcuts are resolved against (defaults to the label)
    pub key: String,
    /// Dimmed description shown after the label
    pub hint: Option<String>,
}

impl<T> SelectItem<T> {
    #[must_use]
    pub fn new(value: T, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value,
            key: label.clone(),
            label,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// A single selection prompt.
pub struct Select<'a, T> {
    message: &'a str,
    items: Vec<SelectItem<T>>,
    cursor: usize,
    initial: Option<usize>,
    shortcuts: Option<ShortcutMapping>,
    show_hints: bool,
    help_message: Option<&'a str>,
    preceding: usize,
    theme: Theme,
}

impl<'a, T: Clone> Select<'a, T> {
    /// Creates a new select prompt with the given message and items.
    #[must_use]
    pub fn new(message: &'a str, items: Vec<SelectItem<T>>) -> Self {
        Self {
            message,
            items,
            cursor: 0,
            initial: None,
            shortcuts: None,
            show_hints: false,
            help_message: None,
            preceding: 0,
            theme: Theme::default(),
        }
    }

    /// Sets the help message displayed below the list.
    #[must_use]
    pub fn with_help_message(mut self, message: &'a str) -> Self {
        self.help_message = Some(message);
        self
    }

    /// Sets the initial cursor position, which is also the non-TTY answer.
    #[must_use]
    pub fn with_starting_cursor(mut self, index: usize) -> Self {
        if index < self.items.len() {
            self.cursor = index;
            self.initial = Some(index);
        }
        self
    }

    /// Places the cursor on the first item whose value equals `value`.
    #[must_use]
    pub fn with_initial_value(self, value: &T) -> Self
    where
        T: PartialEq,
    {
        match self.items.iter().position(|item| item.value == *value) {
            Some(idx) => self.with_starting_cursor(idx),
            None => self,
        }
    }

    /// Enables single-key shortcuts, optionally rendering the key next to each row.
    #[must_use]
    pub fn with_shortcuts(mut self, mapping: ShortcutMapping, show_hints: bool) -> Self {
        self.shortcuts = (!mapping.is_empty()).then_some(mapping);
        self.show_hints = show_hints;
        self
    }

    /// Also erase `lines` lines the caller printed right before this prompt.
    #[must_use]
    pub fn with_clear_preceding(mut self, lines: usize) -> Self {
        self.preceding = lines;
        self
    }

    /// Index of the active row.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Runs the select prompt and returns the selected item's value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` - User selected an item
    /// - `Ok(None)` - User cancelled with Escape / Ctrl+C, or there was nothing to select
    /// - `Err(_)` - Terminal error occurred
    pub fn prompt(self) -> PromptResult<T> {
        if self.items.is_empty() {
            return Ok(None);
        }
        run_interactive(self, |select| select.fallback())
    }

    /// Runs the prompt against an explicit screen and key source.
    pub fn prompt_with<W: Write, K: KeySource>(
        mut self,
        screen: &mut Screen<W>,
        keys: &mut K,
    ) -> PromptResult<T> {
        if self.items.is_empty() {
            return Ok(None);
        }
        drive(&mut self, screen, keys)
    }

    /// Answer used when there is no terminal to ask on.
    #[must_use]
    pub fn fallback(&self) -> Option<T> {
        self.items
            .get(self.initial.unwrap_or(0))
            .map(|item| item.value.clone())
    }

    fn move_cursor_up(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.items.len().saturating_sub(1)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    fn move_cursor_down(&mut self) {
        let next = self.cursor.saturating_add(1);
        self.cursor = if next >= self.items.len() { 0 } else { next };
    }

    fn shortcut_target(&self, c: char) -> Option<usize> {
        let mapping = self.shortcuts.as_ref()?;
        let value = match_key(c, mapping)?;
        self.items.iter().position(|item| item.key == value)
    }

    fn submit(&self, idx: usize) -> Step<T> {
        self.items
            .get(idx)
            .map_or(Step::Continue, |item| Step::Submit(item.value.clone()))
    }

    fn shortcut_column(&self, item: &SelectItem<T>) -> Option<String> {
        if !self.show_hints {
            return None;
        }
        let mapping = self.shortcuts.as_ref()?;
        Some(match mapping.key_for(&item.key) {
            Some(k) => format!("[{k}] ").color(self.theme.shortcut).to_string(),
            None => "    ".to_string(),
        })
    }
}

impl<T: Clone> Prompt for Select<'_, T> {
    type Output = T;

    fn frame(&self) -> Vec<String> {
        let width = self
            .items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(self.items.len().saturating_add(2));
        lines.push(self.theme.header(self.message));

        for (idx, item) in self.items.iter().enumerate() {
            let active = idx == self.cursor;
            let pointer = if active {
                self.theme.pointer.color(self.theme.selected).to_string()
            } else {
                " ".to_string()
            };
            let color = if active {
                self.theme.selected
            } else {
                self.theme.unselected
            };
            let shortcut = self.shortcut_column(item).unwrap_or_default();
            let label = pad(&item.label, width).color(color);
            let hint = item
                .hint
                .as_deref()
                .map(|h| format!("  {}", h.color(self.theme.help)))
                .unwrap_or_default();

            lines.push(format!("{pointer} {shortcut}{label}{hint}"));
        }

        let help = match (self.help_message, &self.shortcuts) {
            (Some(h), _) => h.to_string(),
            (None, Some(_)) => "↑↓ navigate · enter select · letter shortcut · esc cancel".to_string(),
            (None, None) => "↑↓ navigate · enter select · esc cancel".to_string(),
        };
        lines.push(self.theme.help_line(&help).to_string());

        lines
    }

    fn handle_key(&mut self, key: Key) -> Result<Step<T>> {
        if let Key::Char(c) = key
            && let Some(idx) = self.shortcut_target(c)
        {
            self.cursor = idx;
            return Ok(self.submit(idx));
        }

        let step = match key {
            Key::Up | Key::Char('k') => {
                self.move_cursor_up();
                Step::Continue
            }
            Key::Down | Key::Tab | Key::Char('j') => {
                self.move_cursor_down();
                Step::Continue
            }
            Key::Enter => self.submit(self.cursor),
            Key::Escape | Key::Interrupt => Step::Cancel,
            _ => Step::Continue,
        };
        Ok(step)
    }

    fn summary(&self, answer: Option<&T>) -> String {
        match answer {
            Some(_) => {
                let label = self
                    .items
                    .get(self.cursor)
                    .map_or("", |item| item.label.as_str());
                self.theme.answered(self.message, label)
            }
            None => self.theme.cancelled(self.message),
        }
    }

    fn preceding_lines(&self) -> usize {
        self.preceding
    }
}
