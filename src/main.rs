use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use labcommitr::{
    CommitArgs, ConfigError, InitArgs, Logging, MenuAction, PROJECT_NAME, PROJECT_VERSION,
    PreviewArgs, RevertArgs, commit, get_menu_options, init, preview, revert, show_config,
    tui::{SelectItem, ShortcutOptions, select_prompt},
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Build and create a commit interactively
    #[command(visible_alias = "c")]
    Commit(CommitArgs),

    /// Create a configuration file from a preset
    #[command(visible_alias = "i")]
    Init(InitArgs),

    /// Browse recent commits
    Preview(PreviewArgs),

    /// Revert a commit
    Revert(RevertArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

fn init_logging(verbose: bool) -> Result<()> {
    if verbose {
        Logging::new().with_debug_mode(true).start()
    } else {
        let file_name = format!("{PROJECT_NAME}.log");
        Logging::new().with_file(file_name).start()
    }
}

/// Display the interactive menu and run the chosen command.
fn show_menu() -> Result<()> {
    let options = get_menu_options();
    let mapping: BTreeMap<String, String> = options
        .iter()
        .map(|o| (o.shortcut.to_string(), o.action.to_string()))
        .collect();
    let items = options
        .iter()
        .map(|o| SelectItem::new(o.action, o.label).with_key(o.action.to_string()))
        .collect();

    let choice = select_prompt(
        "What would you like to do?",
        items,
        None,
        Some(ShortcutOptions {
            mapping: &mapping,
            display_hints: true,
        }),
    )
    .context("Failed to read menu selection")?;

    match choice {
        Some(MenuAction::Commit) => commit(&CommitArgs::default()),
        Some(MenuAction::Preview) => preview(&PreviewArgs { limit: 20 }),
        Some(MenuAction::Revert) => revert(&RevertArgs {
            limit: 20,
            ..RevertArgs::default()
        }),
        Some(MenuAction::Init) => init(&InitArgs::default()),
        Some(MenuAction::ShowConfiguration) => show_config(),
        Some(MenuAction::Quit) | None => Ok(()),
    }
}

fn main() -> ExitCode {
    let args = UserArgs::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("{} {e:#}", "⚠".yellow());
    }

    let ret = match args.command {
        None => show_menu(),
        Some(Command::Commit(args)) => commit(&args),
        Some(Command::Init(args)) => init(&args),
        Some(Command::Preview(args)) => preview(&args),
        Some(Command::Revert(args)) => revert(&args),
        Some(Command::Config {
            command: ConfigCommand::Show,
        }) => show_config(),
    };

    match ret {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ConfigError>() {
                Some(config_err) => eprint!("{}", config_err.report()),
                None => eprintln!("{} {e:#}", "✖".red().bold()),
            }
            ExitCode::FAILURE
        }
    }
}
