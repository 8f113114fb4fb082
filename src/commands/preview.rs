//! Read-only commit history browser.

use std::env;

use anyhow::{Result, bail};
use colored::Colorize;

use super::prompter::{Prompter, TerminalPrompter};
use super::{file_summary, shortcut_options};
use crate::common::truncate_chars;
use crate::config::{LoadedConfig, load_config};
use crate::git::{CommitSummary, GitCli, Vcs};
use crate::tui::{SelectItem, terminal::is_interactive};

#[derive(clap::Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Number of recent commits to list
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommitAction {
    Body,
    Files,
    Back,
    Quit,
}

pub fn preview(args: &PreviewArgs) -> Result<()> {
    let cwd = env::current_dir()?;
    let git = GitCli::new(&cwd);

    // Without a terminal the picker would answer itself forever; list instead.
    if !is_interactive() {
        for commit in git.recent_commits(args.limit)? {
            println!("{} {}", commit.hash, commit.subject);
        }
        return Ok(());
    }

    let loaded = load_config(Some(&cwd))?;
    run_preview(&loaded, &git, &mut TerminalPrompter, args.limit).map(|_| ())
}

/// Lets the user pick commits and inspect them until they quit.
///
/// Returns the hashes opened, in order.
pub fn run_preview<P: Prompter, V: Vcs>(
    loaded: &LoadedConfig,
    vcs: &V,
    prompter: &mut P,
    limit: usize,
) -> Result<Vec<String>> {
    if !vcs.is_repository() {
        bail!("Not inside a git repository");
    }

    let commits = vcs.recent_commits(limit)?;
    if commits.is_empty() {
        prompter.note("No commits yet.");
        return Ok(Vec::new());
    }

    let mut opened = Vec::new();
    let mut last: Option<String> = None;
    loop {
        let mut items: Vec<SelectItem<Option<String>>> = commits
            .iter()
            .map(|c| {
                SelectItem::new(Some(c.hash.clone()), format!("{} {}", c.hash, truncate_chars(&c.subject, 60)))
                    .with_hint(format!("{}, {}", c.author, c.when))
            })
            .collect();
        items.push(SelectItem::new(None, "quit"));

        let initial = last.clone().map(Some);
        let Some(Some(hash)) =
            prompter.select("Select a commit to inspect:", items, initial.as_ref(), None)?
        else {
            return Ok(opened);
        };
        let Some(commit) = commits.iter().find(|c| c.hash == hash) else {
            continue;
        };

        opened.push(hash.clone());
        last = Some(hash);
        if inspect(loaded, vcs, prompter, commit)? == CommitAction::Quit {
            return Ok(opened);
        }
    }
}

/// Action loop for one commit; returns `Back` or `Quit`.
fn inspect<P: Prompter, V: Vcs>(
    loaded: &LoadedConfig,
    vcs: &V,
    prompter: &mut P,
    commit: &CommitSummary,
) -> Result<CommitAction> {
    let config = &loaded.config;
    prompter.note(&format!("{} {}", commit.hash.yellow(), commit.subject.bold()));
    prompter.note(&format!("  {}, {}", commit.author, commit.when).dimmed().to_string());
    if commit.is_merge() {
        prompter.note(&format!("  merge of {} parents", commit.parents));
    }

    loop {
        let items = vec![
            SelectItem::new(CommitAction::Body, "body").with_hint("full message"),
            SelectItem::new(CommitAction::Files, "files").with_hint("changed files"),
            SelectItem::new(CommitAction::Back, "back").with_hint("commit list"),
            SelectItem::new(CommitAction::Quit, "quit"),
        ];
        let shortcuts = shortcut_options(config, &config.advanced.shortcuts.prompts.preview);

        match prompter.select("View:", items, None, shortcuts)? {
            Some(CommitAction::Body) => {
                let message = vcs.commit_message(&commit.hash)?;
                for line in message.lines() {
                    prompter.note(&format!("  {line}"));
                }
            }
            Some(CommitAction::Files) => {
                let files = vcs.commit_files(&commit.hash)?;
                if files.is_empty() {
                    prompter.note("  (no file changes)");
                }
                for line in file_summary(&files) {
                    prompter.note(&line);
                }
            }
            Some(CommitAction::Back) => return Ok(CommitAction::Back),
            Some(CommitAction::Quit) | None => return Ok(CommitAction::Quit),
        }
    }
}
