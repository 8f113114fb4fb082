//! External editor support for commit bodies.

use std::env;
use std::fs;
use std::io::Write;
use std::process::Command;

use anyhow::{Context, Result, bail};
use log::debug;

const COMMENT_PREFIX: char = '#';

/// Editor command from `$VISUAL`, then `$EDITOR`, then a platform default.
#[must_use]
pub fn editor_command() -> String {
    env::var("VISUAL")
        .ok()
        .or_else(|| env::var("EDITOR").ok())
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

/// Whether an editor is configured explicitly in the environment.
#[must_use]
pub fn has_configured_editor() -> bool {
    ["VISUAL", "EDITOR"]
        .iter()
        .any(|key| env::var(key).is_ok_and(|v| !v.trim().is_empty()))
}

/// Opens `initial` in the user's editor and returns the edited text with
/// comment lines removed.
pub fn edit_text(initial: &str, instructions: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("COMMIT_BODY_")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temporary file for the editor")?;

    write!(file, "{initial}\n\n")?;
    for line in instructions.lines() {
        writeln!(file, "{COMMENT_PREFIX} {line}")?;
    }
    file.flush()?;

    let command = editor_command();
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    debug!("Launching editor: {command}");

    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .with_context(|| format!("Failed to launch editor: {command}"))?;

    if !status.success() {
        bail!("Editor exited with status {status}");
    }

    let edited = fs::read_to_string(file.path()).context("Failed to read edited file")?;
    Ok(strip_comments(&edited))
}

/// Drops `#` comment lines and surrounding blank lines.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with(COMMENT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
