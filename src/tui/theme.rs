//! Theme configuration for consistent styling across prompt components.

use colored::{Color, ColoredString, Colorize};

/// Colors and glyphs shared by all prompts.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Color of the prompt marker and titles
    pub title: Color,
    /// Color of the active row
    pub selected: Color,
    /// Color of inactive rows
    pub unselected: Color,
    /// Color of hints, placeholders and help text
    pub help: Color,
    /// Color of inline validation errors
    pub error: Color,
    /// Color of the submitted answer in the summary line
    pub success: Color,
    /// Color of shortcut hints
    pub shortcut: Color,
    pub pointer: &'static str,
    pub bullet_on: &'static str,
    pub bullet_off: &'static str,
    pub done_mark: &'static str,
    pub cancel_mark: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            selected: Color::BrightCyan,
            unselected: Color::White,
            help: Color::BrightBlack,
            error: Color::Red,
            success: Color::Green,
            shortcut: Color::Yellow,
            pointer: "❯",
            bullet_on: "◉",
            bullet_off: "◯",
            done_mark: "✔",
            cancel_mark: "✖",
        }
    }
}

impl Theme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Header line shown while the prompt is active.
    #[must_use]
    pub fn header(&self, message: &str) -> String {
        format!("{} {}", "?".color(self.title).bold(), message.bold())
    }

    /// Collapsed line for a submitted answer.
    #[must_use]
    pub fn answered(&self, message: &str, answer: &str) -> String {
        format!(
            "{} {} {}",
            self.done_mark.color(self.success),
            message.bold(),
            answer.color(self.title)
        )
    }

    /// Collapsed line for a cancelled prompt.
    #[must_use]
    pub fn cancelled(&self, message: &str) -> String {
        format!("{} {}", self.cancel_mark.color(self.error), message.bold())
    }

    #[must_use]
    pub fn help_line(&self, text: &str) -> ColoredString {
        text.color(self.help)
    }

    #[must_use]
    pub fn error_line(&self, text: &str) -> String {
        format!("{} {}", ">>".color(self.error), text.color(self.error))
    }
}
