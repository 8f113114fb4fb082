//! Revert workflow.

use std::env;

use anyhow::{Result, bail};
use colored::Colorize;
use log::{info, warn};

use super::print_cancelled;
use super::prompter::{Prompter, TerminalPrompter};
use crate::common::{PROJECT_NAME, truncate_chars};
use crate::config::{LoadedConfig, load_config};
use crate::git::{CommitRequest, CommitSummary, GitCli, Vcs};
use crate::message::CommitMessage;
use crate::tui::{SelectItem, terminal::is_interactive};

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RevertArgs {
    /// Commit hash to revert (prompted when omitted)
    pub commit: Option<String>,

    /// Continue a revert after resolving conflicts
    #[arg(long, conflicts_with = "abort")]
    pub r#continue: bool,

    /// Abort an in-progress revert
    #[arg(long)]
    pub abort: bool,

    /// Number of recent commits to choose from
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Skip git commit hooks
    #[arg(long)]
    pub no_verify: bool,
}

/// What a completed revert run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertOutcome {
    /// A revert commit was created with this hash.
    Reverted(String),
    /// An in-progress revert was abandoned.
    Aborted,
    /// An in-progress revert was concluded after conflict resolution.
    Continued,
}

pub fn revert(args: &RevertArgs) -> Result<()> {
    let cwd = env::current_dir()?;
    let loaded = load_config(Some(&cwd))?;
    let git = GitCli::new(&cwd);

    if args.commit.is_none() && !args.r#continue && !args.abort && !is_interactive() {
        bail!("No commit given; pass a commit hash when not running in a terminal");
    }

    let check = "✔".green().bold();
    match run_revert(&loaded, &git, &mut TerminalPrompter, args)? {
        Some(RevertOutcome::Reverted(hash)) => println!("{check} Reverted as {}", hash.cyan()),
        Some(RevertOutcome::Aborted) => println!("{check} Revert aborted"),
        Some(RevertOutcome::Continued) => println!("{check} Revert continued"),
        None => print_cancelled(),
    }
    Ok(())
}

/// Runs the revert workflow; `Ok(None)` means the user cancelled.
pub fn run_revert<P: Prompter, V: Vcs>(
    loaded: &LoadedConfig,
    vcs: &V,
    prompter: &mut P,
    args: &RevertArgs,
) -> Result<Option<RevertOutcome>> {
    if !vcs.is_repository() {
        bail!("Not inside a git repository");
    }

    if args.abort {
        vcs.revert_abort()?;
        return Ok(Some(RevertOutcome::Aborted));
    }
    if args.r#continue {
        vcs.revert_continue()?;
        return Ok(Some(RevertOutcome::Continued));
    }

    let commits = vcs.recent_commits(args.limit)?;
    if commits.is_empty() {
        bail!("No commits to revert");
    }

    let target = match &args.commit {
        Some(id) => match commits.iter().find(|c| c.hash.starts_with(id.as_str()) || id.starts_with(&c.hash)) {
            Some(found) => found.clone(),
            None => bail!(
                "Commit {id} is not among the last {} commits; try a larger --limit",
                args.limit
            ),
        },
        None => {
            let items = commits
                .iter()
                .map(|c| {
                    SelectItem::new(c.clone(), format!("{} {}", c.hash, truncate_chars(&c.subject, 60)))
                        .with_hint(format!("{}, {}", c.author, c.when))
                })
                .collect();
            match prompter.select("Select commit to revert:", items, None, None)? {
                Some(found) => found,
                None => return Ok(None),
            }
        }
    };

    let parent = if target.is_merge() {
        let items = (1..=target.parents)
            .filter_map(|n| u32::try_from(n).ok())
            .map(|n| SelectItem::new(n, format!("parent {n}")))
            .collect();
        match prompter.select("Merge commit: which parent is the mainline?", items, None, None)? {
            Some(n) => Some(n),
            None => return Ok(None),
        }
    } else {
        None
    };

    match prompter.confirm(&format!("Revert {} \"{}\"?", target.hash, target.subject), true)? {
        Some(true) => {}
        _ => return Ok(None),
    }

    if let Err(err) = vcs.revert(&target.hash, parent) {
        warn!("revert of {} failed: {err}", target.hash);
        if prompter.confirm("The revert did not apply cleanly. Abort it?", true)? == Some(true) {
            vcs.revert_abort()?;
        } else {
            prompter.note(&format!(
                "Resolve the conflicts, stage the files, then run `{PROJECT_NAME} revert --continue`"
            ));
        }
        return Err(err);
    }

    let (subject, body) = revert_message(loaded, &target);
    let hash = vcs.commit(&CommitRequest {
        subject: &subject,
        body: Some(&body),
        sign: loaded.config.advanced.git.sign_commits,
        no_verify: args.no_verify,
    })?;
    info!("Reverted {} as {hash}", target.hash);
    Ok(Some(RevertOutcome::Reverted(hash)))
}

/// Header and body for the revert commit.
///
/// Uses the configured `revert` type when there is one, and git's own
/// `Revert "..."` wording otherwise.
#[must_use]
pub fn revert_message(loaded: &LoadedConfig, target: &CommitSummary) -> (String, String) {
    let config = &loaded.config;
    let body = format!("This reverts commit {}.", target.hash);

    let header = match config.resolve_type("revert") {
        Some(revert_type) => {
            let quoted = format!("\"{}\"", target.subject);
            CommitMessage {
                type_id: revert_type.id.clone(),
                scope: None,
                subject: truncate_chars(&quoted, config.format.subject_max_length),
                body: None,
            }
            .header(config, loaded.emoji_mode_active)
        }
        None => format!("Revert \"{}\"", target.subject),
    };

    (header, body)
}
