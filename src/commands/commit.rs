//! Interactive commit workflow.

use std::env;

use anyhow::{Result, bail};
use colored::Colorize;
use log::info;

use super::prompter::{Prompter, TerminalPrompter};
use super::{print_cancelled, shortcut_options};
use crate::config::{Config, EditorPreference, LoadedConfig, load_config};
use crate::editor::has_configured_editor;
use crate::git::{ChangedFile, CommitRequest, GitCli, Vcs};
use crate::message::{CommitMessage, check_body, check_scope, check_subject};
use crate::tui::{MultiSelectItem, PromptResult, SelectItem};

const BODY_INSTRUCTIONS: &str = "Write the commit body above.\nLines starting with '#' are ignored.";

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CommitArgs {
    /// Commit type id or alias
    #[arg(short = 't', long = "type")]
    pub type_id: Option<String>,

    /// Commit scope
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Subject line
    #[arg(short = 'm', long = "message")]
    pub subject: Option<String>,

    /// Commit body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Skip git commit hooks
    #[arg(long)]
    pub no_verify: bool,
}

impl CommitArgs {
    /// Type and subject flags together make the run non-interactive.
    #[must_use]
    pub fn is_scripted(&self) -> bool {
        self.type_id.is_some() && self.subject.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyMode {
    Inline,
    Editor,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviewAction {
    Commit,
    EditSubject,
    EditBody,
    Cancel,
}

pub fn commit(args: &CommitArgs) -> Result<()> {
    let cwd = env::current_dir()?;
    let loaded = load_config(Some(&cwd))?;
    let git = GitCli::new(&cwd);

    match run_commit(&loaded, &git, &mut TerminalPrompter, args)? {
        Some(hash) => {
            println!("{} Committed {}", "✔".green().bold(), hash.cyan());
            Ok(())
        }
        None => {
            print_cancelled();
            Ok(())
        }
    }
}

/// Runs the commit workflow; `Ok(None)` means the user cancelled.
pub fn run_commit<P: Prompter, V: Vcs>(
    loaded: &LoadedConfig,
    vcs: &V,
    prompter: &mut P,
    args: &CommitArgs,
) -> Result<Option<String>> {
    if !vcs.is_repository() {
        bail!("Not inside a git repository");
    }

    let config = &loaded.config;
    let Some(staged) = ensure_staged(config, vcs, prompter)? else {
        return Ok(None);
    };
    prompter.note(&format!("{} staged file(s):", staged.len()));
    for line in file_summary(&staged) {
        prompter.note(&line);
    }

    let Some(mut message) = gather(config, loaded.emoji_mode_active, prompter, args)? else {
        return Ok(None);
    };

    if !args.is_scripted() {
        let Some(confirmed) = review(config, loaded.emoji_mode_active, prompter, message)? else {
            return Ok(None);
        };
        message = confirmed;
    }

    let problems = message.problems(config);
    if !problems.is_empty() {
        bail!("Commit message is invalid:\n  - {}", problems.join("\n  - "));
    }

    let header = message.header(config, loaded.emoji_mode_active);
    let hash = vcs.commit(&CommitRequest {
        subject: &header,
        body: message.body.as_deref(),
        sign: config.advanced.git.sign_commits,
        no_verify: args.no_verify,
    })?;
    info!("Created commit {hash}: {header}");
    Ok(Some(hash))
}

/// Staged files, staging tracked changes first when nothing is staged.
fn ensure_staged<P: Prompter, V: Vcs>(
    config: &Config,
    vcs: &V,
    prompter: &mut P,
) -> PromptResult<Vec<ChangedFile>> {
    let staged = vcs.staged_files()?;
    if !staged.is_empty() {
        return Ok(Some(staged));
    }

    if config.advanced.git.auto_stage {
        let added = vcs.stage_all_tracked()?;
        info!("Auto-staged {} tracked file(s)", added.len());
    } else {
        let pending = vcs.unstaged_files()?;
        if !pending.is_empty() {
            let items = pending
                .iter()
                .map(|path| MultiSelectItem::new(path.clone(), path.clone()))
                .collect();
            let Some(chosen) = prompter.multiselect("Nothing is staged. Select files to stage:", items)?
            else {
                return Ok(None);
            };
            vcs.stage(&chosen)?;
        }
    }

    let staged = vcs.staged_files()?;
    if staged.is_empty() {
        bail!("Nothing to commit: stage some changes first");
    }
    Ok(Some(staged))
}

/// One line per file: status letter, path, line counts.
#[must_use]
pub fn file_summary(files: &[ChangedFile]) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            let counts = match (file.additions, file.deletions) {
                (Some(a), Some(d)) => format!(" (+{a} -{d})"),
                _ => String::new(),
            };
            format!("  {} {}{counts}", file.status.letter(), file.path)
        })
        .collect()
}

fn gather<P: Prompter>(
    config: &Config,
    emoji_active: bool,
    prompter: &mut P,
    args: &CommitArgs,
) -> PromptResult<CommitMessage> {
    let Some(type_id) = prompt_type(config, emoji_active, prompter, args.type_id.as_deref())? else {
        return Ok(None);
    };
    let scripted = args.is_scripted();

    let scope = match &args.scope {
        Some(scope) => Some(scope.clone()),
        None if scripted => None,
        None => match prompt_scope(config, &type_id, prompter)? {
            Some(scope) => scope,
            None => return Ok(None),
        },
    };

    let subject = match &args.subject {
        Some(subject) => subject.clone(),
        None => {
            let check = |value: &str| check_subject(config, value);
            let Some(subject) = prompter.text("Subject:", Some("short summary of the change"), None, &check)?
            else {
                return Ok(None);
            };
            subject.trim().to_string()
        }
    };

    let body = match &args.body {
        Some(body) => Some(body.clone()),
        None if scripted => None,
        None => match prompt_body(config, prompter, "")? {
            Some(body) => body,
            None => return Ok(None),
        },
    };

    Ok(Some(CommitMessage {
        type_id,
        scope: scope.filter(|s| !s.trim().is_empty()),
        subject,
        body,
    }))
}

fn prompt_type<P: Prompter>(
    config: &Config,
    emoji_active: bool,
    prompter: &mut P,
    requested: Option<&str>,
) -> PromptResult<String> {
    if let Some(name) = requested {
        let Some(found) = config.resolve_type(name) else {
            bail!(
                "Unknown commit type '{name}'. Available: {}",
                config.type_ids().join(", ")
            );
        };
        return Ok(Some(found.id.clone()));
    }

    let items = config
        .types
        .iter()
        .map(|t| {
            let label = match (&t.emoji, emoji_active) {
                (Some(emoji), true) => format!("{emoji} {}", t.id),
                _ => t.id.clone(),
            };
            SelectItem::new(t.id.clone(), label)
                .with_key(t.id.clone())
                .with_hint(t.description.clone())
        })
        .collect();

    let shortcuts = shortcut_options(config, &config.advanced.shortcuts.prompts.type_prompt);
    prompter.select("Select commit type:", items, None, shortcuts)
}

/// Outer `None` is a cancel; inner `None` is "no scope".
fn prompt_scope<P: Prompter>(
    config: &Config,
    type_id: &str,
    prompter: &mut P,
) -> PromptResult<Option<String>> {
    let rules = &config.validation;
    let required = rules.require_scope_for.iter().any(|t| t == type_id);

    if !rules.allowed_scopes.is_empty() {
        let mut items: Vec<SelectItem<Option<String>>> = rules
            .allowed_scopes
            .iter()
            .map(|scope| SelectItem::new(Some(scope.clone()), scope.clone()))
            .collect();
        if !required {
            items.push(SelectItem::new(None, "(none)"));
        }
        return prompter.select("Select scope:", items, None, None);
    }

    let check = |value: &str| check_scope(config, type_id, value);
    let placeholder = if required { "required" } else { "optional, Enter to skip" };
    let answer = prompter.text("Scope:", Some(placeholder), None, &check)?;
    Ok(answer.map(|scope| Some(scope.trim().to_string()).filter(|s| !s.is_empty())))
}

/// Outer `None` is a cancel; inner `None` is "no body".
fn prompt_body<P: Prompter>(
    config: &Config,
    prompter: &mut P,
    initial: &str,
) -> PromptResult<Option<String>> {
    let body = &config.format.body;

    let mode = match body.editor_preference {
        EditorPreference::Inline => BodyMode::Inline,
        EditorPreference::Editor => BodyMode::Editor,
        EditorPreference::Auto => {
            let mut items = vec![SelectItem::new(BodyMode::Inline, "inline").with_hint("type it here")];
            if has_configured_editor() {
                items.push(SelectItem::new(BodyMode::Editor, "editor").with_hint("open $EDITOR"));
            }
            if !body.required {
                items.push(SelectItem::new(BodyMode::Skip, "skip").with_hint("no body"));
            }
            let initial_mode = if body.required { BodyMode::Inline } else { BodyMode::Skip };
            let shortcuts = shortcut_options(config, &config.advanced.shortcuts.prompts.body);
            match prompter.select("Add a body?", items, Some(&initial_mode), shortcuts)? {
                Some(mode) => mode,
                None => return Ok(None),
            }
        }
    };

    match mode {
        BodyMode::Skip => Ok(Some(None)),
        BodyMode::Inline => {
            let check = |value: &str| check_body(config, value);
            let placeholder = if body.required { "required" } else { "optional" };
            let initial = (!initial.is_empty()).then_some(initial);
            let answer = prompter.text("Body:", Some(placeholder), initial, &check)?;
            Ok(answer.map(|text| Some(text.trim().to_string()).filter(|t| !t.is_empty())))
        }
        BodyMode::Editor => loop {
            let text = prompter.edit(initial, BODY_INSTRUCTIONS)?;
            match check_body(config, &text) {
                None => return Ok(Some(Some(text).filter(|t| !t.is_empty()))),
                Some(problem) => {
                    prompter.note(&format!("{} {problem}", "✖".red()));
                    match prompter.confirm("Edit the body again?", true)? {
                        Some(true) => {}
                        _ => return Ok(None),
                    }
                }
            }
        },
    }
}

/// Shows the rendered message until the user commits or cancels.
fn review<P: Prompter>(
    config: &Config,
    emoji_active: bool,
    prompter: &mut P,
    mut message: CommitMessage,
) -> PromptResult<CommitMessage> {
    loop {
        prompter.note("");
        for line in message.render(config, emoji_active).lines() {
            prompter.note(&format!("  {}", line.bold()));
        }
        prompter.note("");

        let items = vec![
            SelectItem::new(PreviewAction::Commit, "commit"),
            SelectItem::new(PreviewAction::EditSubject, "subject").with_hint("edit subject"),
            SelectItem::new(PreviewAction::EditBody, "body").with_hint("edit body"),
            SelectItem::new(PreviewAction::Cancel, "cancel"),
        ];
        let shortcuts = shortcut_options(config, &config.advanced.shortcuts.prompts.preview);

        match prompter.select("Ready to commit?", items, None, shortcuts)? {
            Some(PreviewAction::Commit) => return Ok(Some(message)),
            Some(PreviewAction::EditSubject) => {
                let check = |value: &str| check_subject(config, value);
                if let Some(subject) = prompter.text("Subject:", None, Some(&message.subject), &check)? {
                    message.subject = subject.trim().to_string();
                }
            }
            Some(PreviewAction::EditBody) => {
                let current = message.body.clone().unwrap_or_default();
                if let Some(body) = prompt_body(config, prompter, &current)? {
                    message.body = body;
                }
            }
            Some(PreviewAction::Cancel) | None => return Ok(None),
        }
    }
}
