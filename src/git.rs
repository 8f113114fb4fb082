//! Git operations used by the commit, preview and revert workflows.
//!
//! Everything shells out to the `git` binary; failures carry git's stderr.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use derive_more::Display;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FileStatus {
    #[display("added")]
    Added,
    #[display("modified")]
    Modified,
    #[display("deleted")]
    Deleted,
    #[display("renamed")]
    Renamed,
    #[display("copied")]
    Copied,
}

impl FileStatus {
    fn from_code(code: &str) -> Option<Self> {
        match code.chars().next()? {
            'A' => Some(Self::Added),
            'M' | 'T' => Some(Self::Modified),
            'D' => Some(Self::Deleted),
            'R' => Some(Self::Renamed),
            'C' => Some(Self::Copied),
            _ => None,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub status: FileStatus,
    pub additions: Option<u64>,
    pub deletions: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: String,
    pub subject: String,
    pub author: String,
    pub when: String,
    pub parents: usize,
}

impl CommitSummary {
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents > 1
    }
}

/// Options for creating a commit.
#[derive(Debug, Clone, Default)]
pub struct CommitRequest<'a> {
    pub subject: &'a str,
    pub body: Option<&'a str>,
    pub sign: bool,
    pub no_verify: bool,
}

/// Version control operations the workflows depend on.
pub trait Vcs {
    fn is_repository(&self) -> bool;
    fn staged_files(&self) -> Result<Vec<ChangedFile>>;
    /// Tracked files with unstaged modifications.
    fn unstaged_files(&self) -> Result<Vec<String>>;
    fn stage(&self, paths: &[String]) -> Result<()>;
    /// Stages every modified tracked file and returns the newly staged paths.
    fn stage_all_tracked(&self) -> Result<Vec<String>>;
    /// Creates a commit and returns its short hash.
    fn commit(&self, request: &CommitRequest<'_>) -> Result<String>;
    /// Applies the inverse of `commit` to the index without committing.
    fn revert(&self, commit: &str, parent: Option<u32>) -> Result<()>;
    fn revert_continue(&self) -> Result<()>;
    fn revert_abort(&self) -> Result<()>;
    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitSummary>>;
    /// Full message of `commit`.
    fn commit_message(&self, commit: &str) -> Result<String>;
    /// Files changed by `commit` relative to its first parent.
    fn commit_files(&self, commit: &str) -> Result<Vec<ChangedFile>>;
}

/// [`Vcs`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    #[must_use]
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .context("Failed to execute git command. Make sure git is installed and in PATH")?;

        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Vcs for GitCli {
    fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"])
            .is_ok_and(|out| out.trim() == "true")
    }

    fn staged_files(&self) -> Result<Vec<ChangedFile>> {
        let names = self.run(&["diff", "--cached", "--name-status"])?;
        let stats = self.run(&["diff", "--cached", "--numstat"])?;
        Ok(merge_numstat(parse_name_status(&names), &stats))
    }

    fn unstaged_files(&self) -> Result<Vec<String>> {
        let out = self.run(&["diff", "--name-only"])?;
        Ok(lines(&out))
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args)?;
        Ok(())
    }

    fn stage_all_tracked(&self) -> Result<Vec<String>> {
        let pending = self.unstaged_files()?;
        if !pending.is_empty() {
            self.run(&["add", "--update"])?;
        }
        Ok(pending)
    }

    fn commit(&self, request: &CommitRequest<'_>) -> Result<String> {
        let mut args = vec!["commit", "-m", request.subject];
        if let Some(body) = request.body.filter(|b| !b.trim().is_empty()) {
            args.extend(["-m", body]);
        }
        if request.sign {
            args.push("-S");
        }
        if request.no_verify {
            args.push("--no-verify");
        }
        self.run(&args)?;

        let hash = self.run(&["rev-parse", "--short", "HEAD"])?;
        Ok(hash.trim().to_string())
    }

    fn revert(&self, commit: &str, parent: Option<u32>) -> Result<()> {
        let parent = parent.map(|p| p.to_string());
        let mut args = vec!["revert", "--no-commit"];
        if let Some(p) = parent.as_deref() {
            args.extend(["-m", p]);
        }
        args.push(commit);
        self.run(&args)?;
        Ok(())
    }

    fn revert_continue(&self) -> Result<()> {
        self.run(&["-c", "core.editor=true", "revert", "--continue"])?;
        Ok(())
    }

    fn revert_abort(&self) -> Result<()> {
        self.run(&["revert", "--abort"])?;
        Ok(())
    }

    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitSummary>> {
        let count = limit.to_string();
        let out = self.run(&[
            "log",
            "-n",
            &count,
            "--pretty=format:%h%x1f%s%x1f%an%x1f%ar%x1f%p",
        ])?;
        Ok(parse_log(&out))
    }

    fn commit_message(&self, commit: &str) -> Result<String> {
        let out = self.run(&["show", "--no-patch", "--format=%B", commit])?;
        Ok(out.trim_end().to_string())
    }

    fn commit_files(&self, commit: &str) -> Result<Vec<ChangedFile>> {
        let names = self.run(&["show", "--format=", "--first-parent", "--name-status", commit])?;
        let stats = self.run(&["show", "--format=", "--first-parent", "--numstat", commit])?;
        Ok(merge_numstat(parse_name_status(&names), &stats))
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Parses `git diff --name-status`; renames and copies keep the new path.
fn parse_name_status(text: &str) -> Vec<ChangedFile> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let status = FileStatus::from_code(parts.next()?)?;
            let path = parts.next_back()?.to_string();
            Some(ChangedFile {
                path,
                status,
                additions: None,
                deletions: None,
            })
        })
        .collect()
}

/// Fills line counts from `git diff --numstat`; binary files stay `None`.
fn merge_numstat(mut files: Vec<ChangedFile>, numstat: &str) -> Vec<ChangedFile> {
    for line in numstat.lines() {
        let mut parts = line.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        if let Some(file) = files.iter_mut().find(|f| f.path == path) {
            file.additions = added.parse().ok();
            file.deletions = deleted.parse().ok();
        }
    }
    files
}

fn parse_log(text: &str) -> Vec<CommitSummary> {
    text.lines()
        .filter_map(|line| {
            let mut parts = line.split('\u{1f}');
            Some(CommitSummary {
                hash: parts.next()?.to_string(),
                subject: parts.next()?.to_string(),
                author: parts.next()?.to_string(),
                when: parts.next()?.to_string(),
                parents: parts.next().map_or(0, |p| p.split_whitespace().count()),
            })
        })
        .collect()
}
