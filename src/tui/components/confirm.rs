//! Yes/no prompt built on [`Select`].

use std::{collections::BTreeMap, io::Write};

use super::{PromptResult, Select, SelectItem};
use crate::{
    shortcuts::auto_assign,
    tui::{keys::KeySource, terminal::Screen},
};

/// A boolean select with the default answer listed first and `y`/`n` shortcuts.
pub struct Confirm<'a> {
    select: Select<'a, bool>,
}

impl<'a> Confirm<'a> {
    #[must_use]
    pub fn new(message: &'a str, default: bool) -> Self {
        let yes = SelectItem::new(true, "Yes").with_key("yes");
        let no = SelectItem::new(false, "No").with_key("no");
        let items = if default { vec![yes, no] } else { vec![no, yes] };

        let mapping = auto_assign(&["yes", "no"], &BTreeMap::new());
        let select = Select::new(message, items)
            .with_starting_cursor(0)
            .with_shortcuts(mapping, false)
            .with_help_message("↑↓ navigate · enter select · y/n · esc cancel");

        Self { select }
    }

    /// Also erase `lines` lines the caller printed right before this prompt.
    #[must_use]
    pub fn with_clear_preceding(mut self, lines: usize) -> Self {
        self.select = self.select.with_clear_preceding(lines);
        self
    }

    pub fn prompt(self) -> PromptResult<bool> {
        self.select.prompt()
    }

    pub fn prompt_with<W: Write, K: KeySource>(
        self,
        screen: &mut Screen<W>,
        keys: &mut K,
    ) -> PromptResult<bool> {
        self.select.prompt_with(screen, keys)
    }

    #[must_use]
    pub fn fallback(&self) -> Option<bool> {
        self.select.fallback()
    }
}
