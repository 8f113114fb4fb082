use std::path::PathBuf;
#[cfg(not(unix))]
use std::fs;

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
#[cfg(unix)]
use log::debug;

pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");
pub const PROJECT_VERSION: &str = env!("GIT_VERSION");
pub const PROJECT_VERSION_HASH: &str = env!("GIT_HASH");

/// Primary configuration file name, looked up at the project root.
pub const CONFIG_FILE_NAME: &str = ".labcommitr.config.yaml";

/// Secondary extension variant, only consulted when the primary file is absent.
pub const CONFIG_FILE_NAME_ALT: &str = ".labcommitr.config.yml";

pub fn print_header() {
    println!(
        "{} {} {}",
        PROJECT_NAME.cyan().bold(),
        PROJECT_VERSION,
        PROJECT_VERSION_HASH.bright_black()
    );
}

/// Returns the project data directory, creating it with owner-only permissions if needed.
///
/// Returns: Path to `~/.local/share/labcommitr` (or equivalent)
pub fn project_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| anyhow!("Unable to determine data directory. Ensure XDG_DATA_HOME or HOME environment variable is set"))?;

    let project_data_dir = data_dir.join(PROJECT_NAME);

    create_private_directory(&project_data_dir)?;

    Ok(project_data_dir)
}

/// Creates a directory readable only by its owner (0700 on Unix).
#[cfg(unix)]
fn create_private_directory(dir: &std::path::Path) -> Result<()> {
    use std::fs::DirBuilder;
    use std::os::unix::fs::DirBuilderExt;

    debug!("Creating data directory: {}", dir.display());

    let mut builder = DirBuilder::new();
    builder.recursive(true).mode(0o700);

    builder
        .create(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;

    Ok(())
}

#[cfg(not(unix))]
fn create_private_directory(dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create directory: {}", dir.display()))?;
    Ok(())
}

/// Truncates `text` to `max` characters, appending an ellipsis when shortened.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
