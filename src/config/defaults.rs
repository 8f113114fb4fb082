//! Built-in configuration values.

use std::collections::BTreeMap;

use super::types::{
    AdvancedConfig, BehaviorConfig, BodyConfig, CommitType, Config, EmojiDetection, FormatConfig,
    GitConfig, ShortcutsConfig, ValidationRules,
};

pub const CONFIG_VERSION: &str = "1.0";
pub const TEMPLATE: &str = "{emoji}{type}({scope}): {subject}";
pub const SUBJECT_MAX_LENGTH: usize = 50;
pub const SUBJECT_MIN_LENGTH: usize = 3;
pub const EMOJI_ENABLED: bool = true;
pub const BODY_REQUIRED: bool = false;
pub const BODY_MIN_LENGTH: usize = 0;
pub const SHORTCUTS_ENABLED: bool = true;
pub const SHORTCUTS_DISPLAY_HINTS: bool = true;

/// Default values for every field except `types`, which stays empty.
#[must_use]
pub fn default_config() -> Config {
    Config {
        version: CONFIG_VERSION.to_string(),
        config: BehaviorConfig {
            emoji_enabled: EMOJI_ENABLED,
            force_emoji_detection: EmojiDetection::Auto,
        },
        format: FormatConfig {
            template: TEMPLATE.to_string(),
            subject_max_length: SUBJECT_MAX_LENGTH,
            body: BodyConfig::default(),
        },
        types: Vec::new(),
        validation: ValidationRules {
            require_scope_for: Vec::new(),
            allowed_scopes: Vec::new(),
            subject_min_length: SUBJECT_MIN_LENGTH,
            prohibited_words: Vec::new(),
            prohibited_words_body: Vec::new(),
        },
        advanced: AdvancedConfig {
            aliases: BTreeMap::new(),
            git: GitConfig::default(),
            shortcuts: ShortcutsConfig::default(),
        },
    }
}

/// Conventional commit types used when no configuration file exists.
#[must_use]
pub fn baseline_types() -> Vec<CommitType> {
    vec![
        CommitType::new("feat", "A new feature", Some("✨")),
        CommitType::new("fix", "A bug fix", Some("🐛")),
        CommitType::new("docs", "Documentation changes", Some("📚")),
        CommitType::new("style", "Formatting, no code change", Some("💄")),
        CommitType::new("refactor", "Code change that neither fixes nor adds", Some("♻️")),
        CommitType::new("test", "Adding or fixing tests", Some("🧪")),
        CommitType::new("chore", "Build process or tooling", Some("🔧")),
    ]
}

/// Defaults plus the baseline types.
#[must_use]
pub fn fallback_config() -> Config {
    Config {
        types: baseline_types(),
        ..default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_types() {
        assert!(default_config().types.is_empty());
    }

    #[test]
    fn test_fallback_config_ids_are_valid() {
        let config = fallback_config();
        let ids = config.type_ids();
        assert_eq!(ids, vec!["feat", "fix", "docs", "style", "refactor", "test", "chore"]);
        assert!(ids.iter().all(|id| id.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn test_serde_defaults_match_constants() {
        let body: BodyConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(body, default_config().format.body);

        let shortcuts: ShortcutsConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(shortcuts, default_config().advanced.shortcuts);
    }
}
