//! Key/value block printed inline to stdout.

use colored::{Color, Colorize};

/// One row of a [`ConfigView`].
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub label: String,
    pub value: String,
}

impl ConfigEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Renders a boolean as `enabled` / `disabled`.
    #[must_use]
    pub fn bool(label: impl Into<String>, value: bool) -> Self {
        Self::new(label, if value { "enabled" } else { "disabled" })
    }

    /// Renders a list comma-separated, or `placeholder` when empty.
    #[must_use]
    pub fn list(label: impl Into<String>, values: &[String], placeholder: &str) -> Self {
        if values.is_empty() {
            Self::new(label, placeholder)
        } else {
            Self::new(label, values.join(", "))
        }
    }
}

/// A titled, label-aligned block of entries.
pub struct ConfigView<'a> {
    title: &'a str,
    entries: Vec<ConfigEntry>,
}

impl<'a> ConfigView<'a> {
    #[must_use]
    pub fn new(title: &'a str, entries: Vec<ConfigEntry>) -> Self {
        Self { title, entries }
    }

    /// Lines of the block without trailing newlines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return Vec::new();
        }

        let max_label_width = self
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            self.title.color(Color::Cyan).bold().to_string(),
            "─"
                .repeat(self.title.chars().count())
                .color(Color::Blue)
                .to_string(),
        ];

        for entry in &self.entries {
            let padding = max_label_width.saturating_sub(entry.label.chars().count());
            lines.push(format!(
                "  {}{} {} {}",
                entry.label.color(Color::Cyan).bold(),
                " ".repeat(padding),
                ":".color(Color::BrightBlack),
                entry.value.color(Color::White)
            ));
        }

        lines
    }

    pub fn print(&self) {
        let lines = self.lines();
        if lines.is_empty() {
            return;
        }
        println!();
        for line in lines {
            println!("{line}");
        }
    }
}
