#![allow(clippy::unwrap_used)]

mod commit_tests;
mod revert_tests;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{Result, anyhow, bail};

use super::prompter::{Prompter, TextCheck};
use crate::config::defaults::fallback_config;
use crate::config::{Config, ConfigSource, LoadedConfig, ProjectRoot, RootMarker};
use crate::git::{ChangedFile, CommitRequest, CommitSummary, FileStatus, Vcs};
use crate::shortcuts::{auto_assign, match_key};
use crate::tui::{MultiSelectItem, PromptResult, SelectItem, ShortcutOptions};

/// One scripted answer.
#[derive(Debug, Clone)]
pub(super) enum Answer {
    /// Pick the item at this index
    Pick(usize),
    /// Press this shortcut letter
    Key(char),
    Text(&'static str),
    Yes,
    No,
    /// Toggle these indices, then submit
    Toggle(Vec<usize>),
    Edited(&'static str),
    Cancel,
}

/// [`Prompter`] that replays answers and records every question asked.
#[derive(Default)]
pub(super) struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
    pub notes: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    fn next(&mut self, message: &str) -> Result<Answer> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for '{message}'"))
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn select<T: Clone + PartialEq>(
        &mut self,
        message: &str,
        items: Vec<SelectItem<T>>,
        _initial: Option<&T>,
        shortcuts: Option<ShortcutOptions<'_>>,
    ) -> PromptResult<T> {
        match self.next(message)? {
            Answer::Pick(idx) => Ok(items.get(idx).map(|item| item.value.clone())),
            Answer::Key(key) => {
                let Some(options) = shortcuts else {
                    bail!("'{message}' has no shortcuts");
                };
                let keys: Vec<&str> = items.iter().map(|item| item.key.as_str()).collect();
                let mapping = auto_assign(&keys, options.mapping);
                let target = match_key(key, &mapping).ok_or_else(|| anyhow!("no shortcut '{key}'"))?;
                Ok(items
                    .iter()
                    .find(|item| item.key == target)
                    .map(|item| item.value.clone()))
            }
            Answer::Cancel => Ok(None),
            other => bail!("unexpected {other:?} for select '{message}'"),
        }
    }

    fn text(
        &mut self,
        message: &str,
        _placeholder: Option<&str>,
        _initial: Option<&str>,
        check: TextCheck<'_>,
    ) -> PromptResult<String> {
        match self.next(message)? {
            Answer::Text(value) => match check(value) {
                None => Ok(Some(value.to_string())),
                Some(problem) => bail!("'{value}' rejected: {problem}"),
            },
            Answer::Cancel => Ok(None),
            other => bail!("unexpected {other:?} for text '{message}'"),
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> PromptResult<bool> {
        match self.next(message)? {
            Answer::Yes => Ok(Some(true)),
            Answer::No => Ok(Some(false)),
            Answer::Cancel => Ok(None),
            other => bail!("unexpected {other:?} for confirm '{message}'"),
        }
    }

    fn multiselect<T: Clone>(
        &mut self,
        message: &str,
        items: Vec<MultiSelectItem<T>>,
    ) -> PromptResult<Vec<T>> {
        match self.next(message)? {
            Answer::Toggle(indices) => Ok(Some(
                indices
                    .iter()
                    .filter_map(|idx| items.get(*idx).map(|item| item.value.clone()))
                    .collect(),
            )),
            Answer::Cancel => Ok(None),
            other => bail!("unexpected {other:?} for multiselect '{message}'"),
        }
    }

    fn edit(&mut self, _initial: &str, _instructions: &str) -> Result<String> {
        match self.next("editor")? {
            Answer::Edited(text) => Ok(text.to_string()),
            other => bail!("unexpected {other:?} for editor"),
        }
    }

    fn note(&mut self, line: &str) {
        self.notes.push(line.to_string());
    }
}

/// In-memory repository.
#[derive(Default)]
pub(super) struct FakeVcs {
    pub staged: RefCell<Vec<ChangedFile>>,
    pub unstaged: RefCell<Vec<String>>,
    pub commits: Vec<CommitSummary>,
    pub committed: RefCell<Vec<(String, Option<String>, bool, bool)>>,
    pub reverted: RefCell<Vec<(String, Option<u32>)>>,
    pub aborted: RefCell<bool>,
    pub fail_revert: bool,
    pub not_a_repo: bool,
}

impl FakeVcs {
    pub fn with_staged(paths: &[&str]) -> Self {
        let vcs = Self::default();
        vcs.staged.replace(paths.iter().map(|p| staged(p)).collect());
        vcs
    }
}

pub(super) fn staged(path: &str) -> ChangedFile {
    ChangedFile {
        path: path.to_string(),
        status: FileStatus::Modified,
        additions: Some(1),
        deletions: Some(0),
    }
}

pub(super) fn summary(hash: &str, subject: &str, parents: usize) -> CommitSummary {
    CommitSummary {
        hash: hash.to_string(),
        subject: subject.to_string(),
        author: "Ada".to_string(),
        when: "2 days ago".to_string(),
        parents,
    }
}

pub(super) fn history() -> FakeVcs {
    FakeVcs {
        commits: vec![
            summary("a1b2c3d", "feat: add login", 1),
            summary("e4f5a6b", "Merge branch 'topic'", 2),
            summary("0912abc", "fix: typo", 1),
        ],
        ..FakeVcs::default()
    }
}

impl Vcs for FakeVcs {
    fn is_repository(&self) -> bool {
        !self.not_a_repo
    }

    fn staged_files(&self) -> Result<Vec<ChangedFile>> {
        Ok(self.staged.borrow().clone())
    }

    fn unstaged_files(&self) -> Result<Vec<String>> {
        Ok(self.unstaged.borrow().clone())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.unstaged.borrow_mut().retain(|p| !paths.contains(p));
        self.staged
            .borrow_mut()
            .extend(paths.iter().map(|p| staged(p)));
        Ok(())
    }

    fn stage_all_tracked(&self) -> Result<Vec<String>> {
        let pending: Vec<String> = self.unstaged.borrow_mut().drain(..).collect();
        self.staged
            .borrow_mut()
            .extend(pending.iter().map(|p| staged(p)));
        Ok(pending)
    }

    fn commit(&self, request: &CommitRequest<'_>) -> Result<String> {
        self.committed.borrow_mut().push((
            request.subject.to_string(),
            request.body.map(String::from),
            request.sign,
            request.no_verify,
        ));
        Ok("c0ffee1".to_string())
    }

    fn revert(&self, commit: &str, parent: Option<u32>) -> Result<()> {
        if self.fail_revert {
            bail!("conflict in src/lib.rs");
        }
        self.reverted.borrow_mut().push((commit.to_string(), parent));
        Ok(())
    }

    fn revert_continue(&self) -> Result<()> {
        Ok(())
    }

    fn revert_abort(&self) -> Result<()> {
        self.aborted.replace(true);
        Ok(())
    }

    fn recent_commits(&self, limit: usize) -> Result<Vec<CommitSummary>> {
        Ok(self.commits.iter().take(limit).cloned().collect())
    }

    fn commit_message(&self, commit: &str) -> Result<String> {
        let subject = self
            .commits
            .iter()
            .find(|c| c.hash == commit)
            .map_or("", |c| c.subject.as_str());
        Ok(format!("{subject}\n\nBody of {commit}."))
    }

    fn commit_files(&self, commit: &str) -> Result<Vec<ChangedFile>> {
        let merge = self.commits.iter().any(|c| c.hash == commit && c.is_merge());
        Ok(if merge { Vec::new() } else { vec![staged("src/lib.rs")] })
    }
}

pub(super) fn loaded_with(config: Config) -> LoadedConfig {
    LoadedConfig {
        config,
        source: ConfigSource::Defaults,
        path: None,
        loaded_at: SystemTime::now(),
        emoji_mode_active: false,
        project_root: ProjectRoot {
            path: PathBuf::from("/work/app"),
            marker: RootMarker::Git,
            is_monorepo: false,
            subprojects: Vec::new(),
        },
    }
}

pub(super) fn loaded() -> LoadedConfig {
    loaded_with(fallback_config())
}
