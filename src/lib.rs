mod commands;
mod common;
pub mod config;
mod editor;
pub mod git;
mod logging;
pub mod message;
pub mod shortcuts;
pub mod tui;

pub use commands::prompter::{Prompter, TerminalPrompter, TextCheck};
pub use commands::{
    CommitArgs, InitArgs, PreviewArgs, RevertArgs, RevertOutcome, commit, file_summary, init,
    preview, revert, revert_message, run_commit, run_init, run_preview, run_revert, show_config,
    types_table,
};
pub use common::{CONFIG_FILE_NAME, CONFIG_FILE_NAME_ALT, PROJECT_NAME, PROJECT_VERSION};
pub use config::{ConfigError, LoadedConfig, load_config};
pub use logging::Logging;

/// Menu option for the interactive menu
pub struct MenuOption {
    pub label: &'static str,
    pub action: MenuAction,
    pub shortcut: char,
}

/// Actions that can be performed from the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MenuAction {
    #[display("commit")]
    Commit,
    #[display("preview")]
    Preview,
    #[display("revert")]
    Revert,
    #[display("init")]
    Init,
    #[display("config")]
    ShowConfiguration,
    #[display("quit")]
    Quit,
}

/// Returns all available menu options
#[must_use]
pub fn get_menu_options() -> Vec<MenuOption> {
    vec![
        MenuOption {
            label: "Commit staged changes",
            action: MenuAction::Commit,
            shortcut: 'c',
        },
        MenuOption {
            label: "Browse recent commits",
            action: MenuAction::Preview,
            shortcut: 'p',
        },
        MenuOption {
            label: "Revert a commit",
            action: MenuAction::Revert,
            shortcut: 'r',
        },
        MenuOption {
            label: "Create configuration file",
            action: MenuAction::Init,
            shortcut: 'i',
        },
        MenuOption {
            label: "Show configuration",
            action: MenuAction::ShowConfiguration,
            shortcut: 's',
        },
        MenuOption {
            label: "Quit",
            action: MenuAction::Quit,
            shortcut: 'q',
        },
    ]
}
