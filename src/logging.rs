use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::{PROJECT_NAME, project_data_dir};

/// Log files larger than this are started over instead of appended to.
const MAX_LOG_BYTES: u64 = 1024 * 1024;

/// Builder for the process-wide `env_logger` setup.
///
/// Only this crate's records pass the level filter; dependencies are held at
/// `warn`. The prompts own stdout, so records go to stderr or a file.
#[derive(Debug, Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log into `file_name`, resolved against the data directory when relative.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Enable debug-level records (loader, cache, shortcut and git details).
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    fn level(&self) -> LevelFilter {
        if self.debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut builder = env_logger::builder();
        builder
            .filter_level(LevelFilter::Warn)
            .filter_module(PROJECT_NAME, self.level());

        let target = match &self.file_name {
            Some(name) => Target::Pipe(Box::new(open_log_file(&log_file_path(name)?)?)),
            None => Target::Stderr,
        };
        builder.target(target);

        builder.try_init().context("Logger already initialized")
    }
}

/// Absolute names are used as-is, relative ones land in the data directory.
fn log_file_path(file_name: &Path) -> Result<PathBuf> {
    if file_name.is_absolute() {
        return Ok(file_name.to_path_buf());
    }
    Ok(project_data_dir()?.join(file_name))
}

/// Opens `path` for appending, starting over once it grows past the cap.
fn open_log_file(path: &Path) -> Result<File> {
    let oversized = fs::metadata(path).is_ok_and(|meta| meta.len() > MAX_LOG_BYTES);

    let mut options = fs::OpenOptions::new();
    options.create(true);
    if oversized {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options
        .open(path)
        .with_context(|| format!("Unable to open {} for writing", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_level_is_info() {
        let logging = Logging::new();
        assert!(logging.file_name.is_none());
        assert_eq!(logging.level(), LevelFilter::Info);
    }

    #[test]
    fn test_debug_mode_toggles_level() {
        assert_eq!(Logging::new().with_debug_mode(true).level(), LevelFilter::Debug);
        assert_eq!(
            Logging::new().with_debug_mode(true).with_debug_mode(false).level(),
            LevelFilter::Info
        );
    }

    #[test]
    fn test_absolute_log_path_is_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let absolute = temp_dir.path().join("run.log");

        assert_eq!(log_file_path(&absolute).unwrap(), absolute);
    }

    #[test]
    fn test_small_log_is_appended() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("run.log");
        fs::write(&path, "first\n").unwrap();

        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_oversized_log_starts_over() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("run.log");
        let big = vec![b'x'; usize::try_from(MAX_LOG_BYTES).unwrap() + 1];
        fs::write(&path, big).unwrap();

        writeln!(open_log_file(&path).unwrap(), "fresh").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }
}
