//! Emoji mode resolution.

use std::env;

use super::types::{BehaviorConfig, EmojiDetection};

/// Whether emojis should be rendered into messages.
#[must_use]
pub fn emoji_mode_active(behavior: &BehaviorConfig) -> bool {
    if !behavior.emoji_enabled {
        return false;
    }
    match behavior.force_emoji_detection {
        EmojiDetection::On => true,
        EmojiDetection::Off => false,
        EmojiDetection::Auto => terminal_supports_emoji(),
    }
}

/// Best-effort emoji support check from the environment.
#[must_use]
pub fn terminal_supports_emoji() -> bool {
    supports_emoji_with(|key| env::var(key).ok())
}

fn supports_emoji_with(var: impl Fn(&str) -> Option<String>) -> bool {
    let set = |key: &str| var(key).filter(|v| !v.is_empty());

    if set("TERM").is_some_and(|term| term == "dumb") {
        return false;
    }
    if set("CI").is_some() {
        return false;
    }
    if set("WT_SESSION").is_some() {
        return true;
    }
    if set("TERM_PROGRAM").is_some_and(|p| {
        matches!(p.as_str(), "iTerm.app" | "Apple_Terminal" | "vscode" | "WezTerm" | "ghostty")
    }) {
        return true;
    }

    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| set(*key))
        .is_some_and(|locale| {
            let locale = locale.to_ascii_lowercase();
            locale.contains("utf-8") || locale.contains("utf8")
        })
}
