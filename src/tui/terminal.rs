//! Low-level terminal primitives: raw mode, cursor control and line clearing.
//!
//! Raw mode and cursor visibility are process-wide. They are only ever
//! toggled through [`RawModeGuard`], which restores both on every exit path
//! (drop, explicit release, or SIGINT) and refuses nested acquisition.

use std::{
    io::{self, IsTerminal, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    queue,
    terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use signal_hook::{consts::SIGINT, low_level};
use unicode_width::UnicodeWidthChar;

static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Set by the SIGINT handler while a raw-mode session is active.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// The SIGINT handler is registered once and stays for the process lifetime.
static SIGINT_HANDLER_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Exit status used when the process is interrupted (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Returns true when both stdin and stdout are attached to a terminal.
#[must_use]
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// SIGINT action: inside a raw-mode session the key loop is told to restore
/// and exit, outside of one the default action (terminate) runs.
fn on_sigint() {
    if RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    } else {
        let _ = low_level::emulate_default_handler(SIGINT);
    }
}

/// Registers [`on_sigint`] the first time it is called.
fn install_sigint_handler() -> io::Result<()> {
    if SIGINT_HANDLER_INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    // SAFETY: the action only touches atomics and calls
    // `emulate_default_handler`, both async-signal-safe.
    let registered = unsafe { low_level::register(SIGINT, on_sigint) };
    if let Err(e) = registered {
        SIGINT_HANDLER_INSTALLED.store(false, Ordering::SeqCst);
        return Err(e);
    }
    debug!("SIGINT handler installed");
    Ok(())
}

/// Scoped ownership of the terminal's raw mode.
///
/// Acquiring enables raw mode and hides the cursor. While the guard lives,
/// SIGINT only raises [`RawModeGuard::interrupt_flag`]. Dropping (or
/// [`RawModeGuard::release`]) undoes the terminal changes and SIGINT goes
/// back to terminating the process.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Enters raw mode.
    ///
    /// # Errors
    ///
    /// Fails if another guard is alive or the terminal refuses raw mode.
    pub fn acquire() -> io::Result<Self> {
        if RAW_MODE_ACTIVE.load(Ordering::SeqCst) {
            return Err(io::Error::other("terminal raw mode is already acquired"));
        }
        install_sigint_handler()?;
        if RAW_MODE_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(io::Error::other("terminal raw mode is already acquired"));
        }
        INTERRUPTED.store(false, Ordering::SeqCst);

        // Dropping `guard` on the error paths below undoes the partial setup.
        let guard = Self { active: true };

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        hide_cursor(&mut stdout)?;
        stdout.flush()?;
        debug!("raw mode acquired");

        Ok(guard)
    }

    /// Flag raised by SIGINT during this session.
    #[must_use]
    pub fn interrupt_flag(&self) -> &'static AtomicBool {
        &INTERRUPTED
    }

    /// Leaves raw mode, reporting failures instead of swallowing them.
    pub fn release(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.active) {
            return Ok(());
        }

        let raw = disable_raw_mode();
        let mut stdout = io::stdout();
        let cursor = show_cursor(&mut stdout).and_then(|()| stdout.flush());
        RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
        debug!("raw mode released");

        raw.and(cursor)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Restores the terminal and terminates the process after SIGINT.
#[allow(clippy::exit)]
pub fn restore_and_exit() -> ! {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = show_cursor(&mut stdout);
    let _ = write!(stdout, "\r\n");
    let _ = stdout.flush();
    std::process::exit(INTERRUPTED_EXIT_CODE);
}

pub fn hide_cursor(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Hide)
}

pub fn show_cursor(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Show)
}

pub fn move_up(out: &mut impl Write, lines: u16) -> io::Result<()> {
    if lines == 0 {
        return Ok(());
    }
    queue!(out, MoveUp(lines))
}

/// Clears the line the cursor is on and returns to column 0.
pub fn clear_line(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Clear(ClearType::CurrentLine), MoveToColumn(0))
}

/// Clears `count` lines directly above the cursor, leaving the cursor at the
/// start of the topmost cleared line.
pub fn clear_lines_up(out: &mut impl Write, count: usize) -> io::Result<()> {
    for _ in 0..count {
        move_up(out, 1)?;
        clear_line(out)?;
    }
    Ok(())
}

/// Inline frame renderer for one prompt instance.
///
/// Tracks how many lines the previous frame wrote so a re-render erases
/// exactly those lines and nothing printed before the prompt started.
/// Lines are cut to the terminal width so none of them wraps.
#[derive(Debug)]
pub struct Screen<W: Write> {
    out: W,
    width: Option<usize>,
    rendered_lines: usize,
    last_cleared: usize,
}

impl<W: Write> Screen<W> {
    /// Screen sized to the current terminal, unbounded when there is none.
    #[must_use]
    pub fn new(out: W) -> Self {
        let width = terminal::size().ok().map(|(cols, _)| usize::from(cols));
        Self::with_width(out, width)
    }

    #[must_use]
    pub fn with_width(out: W, width: Option<usize>) -> Self {
        Self {
            out,
            width: width.filter(|w| *w > 0),
            rendered_lines: 0,
            last_cleared: 0,
        }
    }

    /// Replaces the previous frame with `lines`.
    pub fn render(&mut self, lines: &[String]) -> io::Result<()> {
        self.erase(0)?;
        for line in lines {
            clear_line(&mut self.out)?;
            let line = self.fit(line);
            write!(self.out, "{line}\r\n")?;
        }
        self.rendered_lines = lines.len();
        self.out.flush()
    }

    /// Erases the frame plus `preceding` caller-owned lines above it and
    /// writes the one-line summary in their place.
    pub fn collapse(&mut self, summary: &str, preceding: usize) -> io::Result<()> {
        self.erase(preceding)?;
        clear_line(&mut self.out)?;
        let summary = self.fit(summary);
        write!(self.out, "{summary}\r\n")?;
        self.rendered_lines = 1;
        self.out.flush()
    }

    fn fit(&self, line: &str) -> String {
        match self.width {
            Some(width) => fit_width(line, width),
            None => line.to_string(),
        }
    }

    fn erase(&mut self, preceding: usize) -> io::Result<()> {
        let count = self.rendered_lines.saturating_add(preceding);
        clear_lines_up(&mut self.out, count)?;
        self.last_cleared = count;
        self.rendered_lines = 0;
        Ok(())
    }

    /// Lines currently occupied by this prompt.
    #[must_use]
    pub fn rendered_lines(&self) -> usize {
        self.rendered_lines
    }

    /// Number of lines erased by the most recent render or collapse.
    #[must_use]
    pub fn last_cleared(&self) -> usize {
        self.last_cleared
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Cuts `line` to `width` visible columns, keeping ANSI escape sequences
/// and ending truncated lines with a style reset.
#[must_use]
pub fn fit_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut used = 0usize;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            if chars.peek() == Some(&'[') {
                for next in chars.by_ref() {
                    out.push(next);
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        let cols = c.width().unwrap_or(0);
        if used.saturating_add(cols) > width {
            out.push_str("\x1b[0m");
            return out;
        }
        out.push(c);
        used = used.saturating_add(cols);
    }
    out
}
