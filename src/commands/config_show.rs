//! `config show`: prints the effective configuration.

use std::env;
use std::time::SystemTime;

use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Margin, Style},
};

use crate::common::print_header;
use crate::config::{ConfigSource, LoadedConfig, load_config};
use crate::tui::{ConfigEntry, ConfigView};

#[derive(Tabled)]
struct TypeRow<'a> {
    id: &'a str,
    emoji: &'a str,
    description: &'a str,
}

pub fn show_config() -> Result<()> {
    let cwd = env::current_dir()?;
    let loaded = load_config(Some(&cwd))?;

    print_header();
    for view in sections(&loaded) {
        view.print();
    }
    println!();
    println!("{}", types_table(&loaded));
    Ok(())
}

/// Commit types as a table.
#[must_use]
pub fn types_table(loaded: &LoadedConfig) -> String {
    let rows = loaded.config.types.iter().map(|t| TypeRow {
        id: &t.id,
        emoji: t.emoji.as_deref().unwrap_or(""),
        description: &t.description,
    });
    let mut table = Table::new(rows);
    table.with(Style::modern()).with(Margin::new(2, 0, 0, 0));
    table.to_string()
}

fn age(at: SystemTime) -> String {
    match at.elapsed().map(|d| d.as_secs()) {
        Ok(0) | Err(_) => "just now".to_string(),
        Ok(secs) => format!("{secs}s ago"),
    }
}

fn sections(loaded: &LoadedConfig) -> Vec<ConfigView<'static>> {
    let config = &loaded.config;
    let source = match (&loaded.source, &loaded.path) {
        (ConfigSource::Project, Some(path)) => path.display().to_string(),
        _ => format!("{} (no config file)", loaded.source),
    };
    let root = &loaded.project_root;

    vec![
        ConfigView::new(
            "Source",
            vec![
                ConfigEntry::new("config", source),
                ConfigEntry::new("project root", format!("{} ({})", root.path.display(), root.marker)),
                ConfigEntry::bool("monorepo", root.is_monorepo),
                ConfigEntry::new("version", config.version.clone()),
                ConfigEntry::new("loaded", age(loaded.loaded_at)),
            ],
        ),
        ConfigView::new(
            "Format",
            vec![
                ConfigEntry::new("template", config.format.template.clone()),
                ConfigEntry::new("subject max", config.format.subject_max_length.to_string()),
                ConfigEntry::bool("body required", config.format.body.required),
                ConfigEntry::new("body min", config.format.body.min_length.to_string()),
                ConfigEntry::new(
                    "body max",
                    config
                        .format
                        .body
                        .max_length
                        .map_or_else(|| "unlimited".to_string(), |m| m.to_string()),
                ),
                ConfigEntry::new("body editor", config.format.body.editor_preference.to_string()),
                ConfigEntry::bool("emoji", config.config.emoji_enabled),
                ConfigEntry::new("emoji detection", config.config.force_emoji_detection.to_string()),
                ConfigEntry::bool("emoji active", loaded.emoji_mode_active),
            ],
        ),
        ConfigView::new(
            "Validation",
            vec![
                ConfigEntry::list("scope required", &config.validation.require_scope_for, "never"),
                ConfigEntry::list("allowed scopes", &config.validation.allowed_scopes, "any"),
                ConfigEntry::new("subject min", config.validation.subject_min_length.to_string()),
                ConfigEntry::list("prohibited", &config.validation.prohibited_words, "none"),
                ConfigEntry::list("prohibited body", &config.validation.prohibited_words_body, "none"),
            ],
        ),
        ConfigView::new(
            "Advanced",
            vec![
                ConfigEntry::new(
                    "aliases",
                    if config.advanced.aliases.is_empty() {
                        "none".to_string()
                    } else {
                        config
                            .advanced
                            .aliases
                            .iter()
                            .map(|(alias, target)| format!("{alias} → {target}"))
                            .collect::<Vec<_>>()
                            .join(", ")
                    },
                ),
                ConfigEntry::bool("auto stage", config.advanced.git.auto_stage),
                ConfigEntry::bool("sign commits", config.advanced.git.sign_commits),
                ConfigEntry::bool("shortcuts", config.advanced.shortcuts.enabled),
                ConfigEntry::bool("shortcut hints", config.advanced.shortcuts.display_hints),
            ],
        ),
    ]
}
