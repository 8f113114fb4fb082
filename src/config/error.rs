//! Structured configuration errors.
//!
//! Every failure carries a one-line summary, a details block, and an ordered
//! list of remedies so the CLI can tell the user exactly what to change.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use thiserror::Error;

use super::validator::ValidationResult;
use crate::common::{CONFIG_FILE_NAME, PROJECT_NAME};

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConfigError {
    pub message: String,
    pub details: String,
    pub solutions: Vec<String>,
    pub path: Option<PathBuf>,
    #[source]
    pub source: Option<BoxedSource>,
}

impl ConfigError {
    #[must_use]
    pub fn new(message: impl Into<String>, details: impl Into<String>, solutions: Vec<String>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
            solutions,
            path: None,
            source: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn start_path(path: &Path, err: io::Error) -> Self {
        Self::new(
            "Cannot resolve the starting directory",
            format!("{}: {err}", path.display()),
            vec![
                "Check that the directory exists".to_string(),
                "Run the command from inside your project".to_string(),
            ],
        )
        .with_path(path)
        .with_source(err)
    }

    pub fn unreadable(path: &Path, err: io::Error) -> Self {
        let (message, solutions) = if err.kind() == io::ErrorKind::PermissionDenied {
            (
                "Configuration file is not readable",
                vec![
                    format!("Check the permissions of {}", path.display()),
                    format!("Run: chmod u+r {}", path.display()),
                ],
            )
        } else {
            (
                "Failed to read configuration file",
                vec![format!("Check that {} is a regular, UTF-8 encoded file", path.display())],
            )
        };

        Self::new(message, format!("{}: {err}", path.display()), solutions)
            .with_path(path)
            .with_source(err)
    }

    pub fn empty_file(path: &Path) -> Self {
        Self::new(
            "Configuration file is empty",
            format!("{} contains no YAML content", path.display()),
            vec![
                format!("Run `{PROJECT_NAME} init` to generate a configuration"),
                format!("Or delete {} to use the built-in defaults", path.display()),
            ],
        )
        .with_path(path)
    }

    pub fn parse(path: &Path, err: serde_yaml::Error) -> Self {
        let location = err.location().map_or_else(String::new, |loc| {
            format!(" at line {}, column {}", loc.line(), loc.column())
        });

        Self::new(
            "Invalid YAML syntax in configuration file",
            format!("{}{location}: {err}", path.display()),
            vec![
                "Check indentation: YAML uses spaces, not tabs".to_string(),
                "Quote values that contain ':' or '#'".to_string(),
                "Validate the file with a YAML linter".to_string(),
            ],
        )
        .with_path(path)
        .with_source(err)
    }

    pub fn not_an_object(path: &Path) -> Self {
        Self::new(
            "Configuration must be a YAML object",
            format!(
                "The top level of {} is not a key/value mapping",
                path.display()
            ),
            vec![
                "Start the file with top-level keys such as `version:` and `types:`".to_string(),
                format!("Run `{PROJECT_NAME} init` to see a valid example"),
            ],
        )
        .with_path(path)
    }

    pub fn missing_types(path: &Path) -> Self {
        Self::new(
            "Configuration is missing the `types` array",
            format!("{} must define `types` as a list of commit types", path.display()),
            vec![
                "Add a `types:` list, for example:\n     types:\n       - id: feat\n         description: A new feature".to_string(),
            ],
        )
        .with_path(path)
    }

    pub fn validation(path: &Path, result: &ValidationResult) -> Self {
        let mut details = String::new();
        for error in &result.errors {
            let _ = writeln!(details, "• {} ({}): {}", error.field_display, error.field, error.user_message);
            if let Some(issue) = &error.issue {
                let _ = writeln!(details, "    Issue: {issue}");
            }
            if let Some(value) = &error.value {
                let _ = writeln!(details, "    Found: {value}");
            }
            if let Some(expected) = &error.expected_format {
                let _ = writeln!(details, "    Expected: {expected}");
            }
            if !error.examples.is_empty() {
                let _ = writeln!(details, "    Examples: {}", error.examples.join(", "));
            }
        }

        let count = result.errors.len();
        Self::new(
            format!(
                "Configuration has {count} validation error{}",
                if count == 1 { "" } else { "s" }
            ),
            details.trim_end().to_string(),
            vec![
                format!("Edit {} and fix the fields listed above", path.display()),
                format!("Run `{PROJECT_NAME} config show` to confirm the result"),
            ],
        )
        .with_path(path)
    }

    pub fn deserialize(path: &Path, err: serde_yaml::Error) -> Self {
        Self::new(
            "Configuration field has the wrong type",
            format!("{}: {err}", path.display()),
            vec![
                "Lengths must be whole numbers and flags must be true or false".to_string(),
                format!("Compare with the file written by `{PROJECT_NAME} init`"),
            ],
        )
        .with_path(path)
        .with_source(err)
    }

    pub fn exists(path: &Path) -> Self {
        Self::new(
            "Configuration file already exists",
            path.display().to_string(),
            vec![
                format!("Run `{PROJECT_NAME} init --force` to overwrite it"),
                format!("Or edit {CONFIG_FILE_NAME} directly"),
            ],
        )
        .with_path(path)
    }

    /// Multi-line human-readable report: summary, details, numbered remedies.
    #[must_use]
    pub fn report(&self) -> String {
        let mut out = format!("{} {}\n", "✖".red().bold(), self.message.red().bold());

        if !self.details.is_empty() {
            out.push('\n');
            for line in self.details.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }

        if !self.solutions.is_empty() {
            let _ = writeln!(out, "\n{}", "How to fix:".yellow().bold());
            for (i, solution) in self.solutions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {solution}", i.saturating_add(1));
            }
        }

        out
    }
}
