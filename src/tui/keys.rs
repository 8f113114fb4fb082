//! Logical key model and the sources prompts read keys from.

use std::{
    collections::VecDeque,
    io,
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use super::terminal;

/// How often the blocking key wait wakes up to check for SIGINT.
const INTERRUPT_POLL: Duration = Duration::from_millis(100);

/// A keystroke reduced to what the prompts dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
    Backspace,
    Delete,
    Space,
    Tab,
    /// Printable character (never a control character).
    Char(char),
    /// Ctrl+C pressed while the terminal is in raw mode.
    Interrupt,
    Other,
}

impl Key {
    /// Maps a crossterm key event to a logical key.
    ///
    /// Returns `None` for release/repeat events that prompts ignore.
    #[must_use]
    pub fn from_event(event: &KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let key = match event.code {
            KeyCode::Char('c') if ctrl => Self::Interrupt,
            KeyCode::Char(_) if ctrl => Self::Other,
            KeyCode::Char(' ') => Self::Space,
            KeyCode::Char(c) if !c.is_control() => Self::Char(c),
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::Enter => Self::Enter,
            KeyCode::Esc => Self::Escape,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Delete => Self::Delete,
            KeyCode::Tab => Self::Tab,
            _ => Self::Other,
        };
        Some(key)
    }
}

/// The single "wait for next key" suspension point of a prompt.
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Reads keys from the real terminal while a [`terminal::RawModeGuard`] is held.
pub struct TerminalKeys {
    interrupted: &'static AtomicBool,
}

impl TerminalKeys {
    #[must_use]
    pub fn new(interrupted: &'static AtomicBool) -> Self {
        Self { interrupted }
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                debug!("SIGINT received during prompt");
                terminal::restore_and_exit();
            }

            if !event::poll(INTERRUPT_POLL)? {
                continue;
            }

            if let Event::Key(key) = event::read()?
                && let Some(key) = Key::from_event(&key)
            {
                return Ok(key);
            }
        }
    }
}

/// Replays a fixed key sequence. Running out of keys is an error so a
/// prompt under test can never block forever.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Scripts typing `text` character by character.
    #[must_use]
    pub fn typing(text: &str) -> Vec<Key> {
        text.chars()
            .map(|c| if c == ' ' { Key::Space } else { Key::Char(c) })
            .collect()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }
}
