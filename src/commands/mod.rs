mod commit;
mod config_show;
mod init;
mod preview;
pub mod prompter;
mod revert;

pub use commit::{CommitArgs, commit, file_summary, run_commit};
pub use config_show::{show_config, types_table};
pub use init::{InitArgs, init, run_init};
pub use preview::{PreviewArgs, preview, run_preview};
pub use revert::{RevertArgs, RevertOutcome, revert, revert_message, run_revert};

use crate::config::{Config, PromptShortcutConfig};
use crate::tui::{ShortcutOptions, Theme};

/// Shortcut settings for one prompt, `None` when shortcuts are disabled.
pub(crate) fn shortcut_options<'a>(
    config: &'a Config,
    prompt: &'a PromptShortcutConfig,
) -> Option<ShortcutOptions<'a>> {
    let shortcuts = &config.advanced.shortcuts;
    shortcuts.enabled.then_some(ShortcutOptions {
        mapping: &prompt.mapping,
        display_hints: shortcuts.display_hints,
    })
}

pub(crate) fn print_cancelled() {
    println!("{}", Theme::default().cancelled("Cancelled"));
}

#[cfg(test)]
mod tests;
