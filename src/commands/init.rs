//! Writes a starter configuration file at the project root.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::info;

use super::print_cancelled;
use super::prompter::{Prompter, TerminalPrompter};
use crate::common::{CONFIG_FILE_NAME, PROJECT_NAME};
use crate::config::presets::{DEFAULT_PRESET, PRESETS, find_preset, load_preset};
use crate::config::root::discover;
use crate::config::{
    ConfigError, RawAdvanced, RawBehavior, RawConfig, RawFormat, find_config_file,
    read_config,
};
use crate::tui::SelectItem;

#[derive(clap::Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Preset to start from (conventional, gitmoji, minimal)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Accept preset defaults without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: &InitArgs) -> Result<()> {
    let cwd = env::current_dir()?;
    let root = discover(&cwd).map_err(|e| ConfigError::start_path(&cwd, e))?;

    match run_init(&root.path, &mut TerminalPrompter, args)? {
        Some(path) => {
            println!("{} Wrote {}", "✔".green().bold(), path.display().to_string().cyan());
            println!("Run `{PROJECT_NAME} commit` to create your first commit.");
            Ok(())
        }
        None => {
            print_cancelled();
            Ok(())
        }
    }
}

/// Creates the configuration file in `root`; `Ok(None)` means cancelled.
pub fn run_init<P: Prompter>(root: &Path, prompter: &mut P, args: &InitArgs) -> Result<Option<PathBuf>> {
    if let Some(existing) = find_config_file(root)
        && !args.force
    {
        if args.yes {
            return Err(ConfigError::exists(&existing).into());
        }
        let question = format!("{} already exists. Overwrite it?", existing.display());
        if prompter.confirm(&question, false)? != Some(true) {
            return Ok(None);
        }
    }

    let preset_id = match &args.preset {
        Some(id) => {
            if find_preset(id).is_none() {
                let known: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
                bail!("Unknown preset '{id}'. Available: {}", known.join(", "));
            }
            id.clone()
        }
        None if args.yes => DEFAULT_PRESET.to_string(),
        None => {
            let items = PRESETS
                .iter()
                .map(|p| SelectItem::new(p.id.to_string(), p.name).with_key(p.id).with_hint(p.description))
                .collect();
            let initial = DEFAULT_PRESET.to_string();
            match prompter.select("Choose a preset:", items, Some(&initial), None)? {
                Some(id) => id,
                None => return Ok(None),
            }
        }
    };

    let mut raw = load_preset(&preset_id)?;
    if !args.yes && customize(&mut raw, prompter)?.is_none() {
        return Ok(None);
    }

    let path = root.join(CONFIG_FILE_NAME);
    write_config(&path, &raw, &preset_id)?;
    read_config(&path)?;
    info!("Wrote {} from preset {preset_id}", path.display());
    Ok(Some(path))
}

/// Asks the handful of questions most projects change from the preset.
fn customize<P: Prompter>(raw: &mut RawConfig, prompter: &mut P) -> Result<Option<()>> {
    let behavior = raw.config.get_or_insert_with(RawBehavior::default);
    let Some(emoji) = prompter.confirm("Use emojis in commit messages?", behavior.emoji_enabled.unwrap_or(false))?
    else {
        return Ok(None);
    };
    behavior.emoji_enabled = Some(emoji);

    let format = raw.format.get_or_insert_with(RawFormat::default);
    let mut body = format.body.clone().unwrap_or_default();
    let Some(required) = prompter.confirm("Require a commit body?", body.required)? else {
        return Ok(None);
    };
    body.required = required;
    format.body = Some(body);

    let advanced = raw.advanced.get_or_insert_with(RawAdvanced::default);
    let mut git = advanced.git.clone().unwrap_or_default();
    let Some(auto_stage) = prompter.confirm("Stage tracked changes automatically when nothing is staged?", git.auto_stage)?
    else {
        return Ok(None);
    };
    git.auto_stage = auto_stage;
    advanced.git = Some(git);

    Ok(Some(()))
}

fn write_config(path: &Path, raw: &RawConfig, preset: &str) -> Result<()> {
    let yaml = serde_yaml::to_string(raw).context("Unable to serialize configuration")?;
    let content = format!(
        "# {PROJECT_NAME} configuration (preset: {preset})\n# Edit types, format and validation rules to match your project.\n{yaml}"
    );
    fs::write(path, content).with_context(|| format!("Unable to write {}", path.display()))
}
