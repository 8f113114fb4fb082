//! Configuration data model.
//!
//! [`RawConfig`] mirrors the YAML file: every section and field is optional
//! except `types`. [`Config`] is the merged, fully-populated value the rest of
//! the program reads. Merging is explicit per section and per field.

use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use super::defaults;

/// One selectable commit type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitType {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl CommitType {
    #[must_use]
    pub fn new(id: &str, description: &str, emoji: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            emoji: emoji.map(String::from),
        }
    }
}

/// Tri-state emoji detection override: `null` (auto), `true`, `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum EmojiDetection {
    #[default]
    #[display("auto")]
    Auto,
    #[display("on")]
    On,
    #[display("off")]
    Off,
}

impl From<Option<bool>> for EmojiDetection {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Auto,
            Some(true) => Self::On,
            Some(false) => Self::Off,
        }
    }
}

impl From<EmojiDetection> for Option<bool> {
    fn from(value: EmojiDetection) -> Self {
        match value {
            EmojiDetection::Auto => None,
            EmojiDetection::On => Some(true),
            EmojiDetection::Off => Some(false),
        }
    }
}

/// How the commit body is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorPreference {
    #[default]
    #[display("auto")]
    Auto,
    #[display("inline")]
    Inline,
    #[display("editor")]
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    pub required: bool,
    pub min_length: usize,
    /// `None` means unlimited.
    pub max_length: Option<usize>,
    pub editor_preference: EditorPreference,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            required: defaults::BODY_REQUIRED,
            min_length: defaults::BODY_MIN_LENGTH,
            max_length: None,
            editor_preference: EditorPreference::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub auto_stage: bool,
    pub sign_commits: bool,
}

/// Configured key -> option value pairs for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptShortcutConfig {
    pub mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptShortcuts {
    #[serde(rename = "type")]
    pub type_prompt: PromptShortcutConfig,
    pub preview: PromptShortcutConfig,
    pub body: PromptShortcutConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutsConfig {
    pub enabled: bool,
    pub display_hints: bool,
    pub prompts: PromptShortcuts,
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::SHORTCUTS_ENABLED,
            display_hints: defaults::SHORTCUTS_DISPLAY_HINTS,
            prompts: PromptShortcuts::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// MERGED
////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub emoji_enabled: bool,
    pub force_emoji_detection: EmojiDetection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub template: String,
    pub subject_max_length: usize,
    pub body: BodyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub require_scope_for: Vec<String>,
    /// Empty means any scope is accepted.
    pub allowed_scopes: Vec<String>,
    pub subject_min_length: usize,
    pub prohibited_words: Vec<String>,
    pub prohibited_words_body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedConfig {
    pub aliases: BTreeMap<String, String>,
    pub git: GitConfig,
    pub shortcuts: ShortcutsConfig,
}

/// Fully merged configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub version: String,
    pub config: BehaviorConfig,
    pub format: FormatConfig,
    pub types: Vec<CommitType>,
    pub validation: ValidationRules,
    pub advanced: AdvancedConfig,
}

impl Config {
    /// Merges `raw` over `defaults`.
    ///
    /// Fields of each section are taken from `raw` when present. Nested
    /// objects (`format.body`, `advanced.git`, `advanced.shortcuts`) are
    /// replaced as a whole. `types` always comes from `raw`.
    #[must_use]
    pub fn merge(raw: RawConfig, defaults: &Config) -> Self {
        Self {
            version: raw.version.unwrap_or_else(|| defaults.version.clone()),
            config: merge_behavior(raw.config, &defaults.config),
            format: merge_format(raw.format, &defaults.format),
            types: raw.types,
            validation: merge_validation(raw.validation, &defaults.validation),
            advanced: merge_advanced(raw.advanced, &defaults.advanced),
        }
    }

    #[must_use]
    pub fn find_type(&self, id: &str) -> Option<&CommitType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// Resolves `name` through `advanced.aliases` to a known type id.
    #[must_use]
    pub fn resolve_type(&self, name: &str) -> Option<&CommitType> {
        let name = name.trim();
        self.find_type(name).or_else(|| {
            self.advanced
                .aliases
                .get(name)
                .and_then(|target| self.find_type(target))
        })
    }

    #[must_use]
    pub fn type_ids(&self) -> Vec<String> {
        self.types.iter().map(|t| t.id.clone()).collect()
    }
}

fn merge_behavior(raw: Option<RawBehavior>, defaults: &BehaviorConfig) -> BehaviorConfig {
    let raw = raw.unwrap_or_default();
    BehaviorConfig {
        emoji_enabled: raw.emoji_enabled.unwrap_or(defaults.emoji_enabled),
        force_emoji_detection: raw
            .force_emoji_detection
            .unwrap_or(defaults.force_emoji_detection),
    }
}

fn merge_format(raw: Option<RawFormat>, defaults: &FormatConfig) -> FormatConfig {
    let raw = raw.unwrap_or_default();
    FormatConfig {
        template: raw.template.unwrap_or_else(|| defaults.template.clone()),
        subject_max_length: raw.subject_max_length.unwrap_or(defaults.subject_max_length),
        body: raw.body.unwrap_or_else(|| defaults.body.clone()),
    }
}

fn merge_validation(raw: Option<RawValidation>, defaults: &ValidationRules) -> ValidationRules {
    let raw = raw.unwrap_or_default();
    ValidationRules {
        require_scope_for: raw
            .require_scope_for
            .unwrap_or_else(|| defaults.require_scope_for.clone()),
        allowed_scopes: raw
            .allowed_scopes
            .unwrap_or_else(|| defaults.allowed_scopes.clone()),
        subject_min_length: raw.subject_min_length.unwrap_or(defaults.subject_min_length),
        prohibited_words: raw
            .prohibited_words
            .unwrap_or_else(|| defaults.prohibited_words.clone()),
        prohibited_words_body: raw
            .prohibited_words_body
            .unwrap_or_else(|| defaults.prohibited_words_body.clone()),
    }
}

fn merge_advanced(raw: Option<RawAdvanced>, defaults: &AdvancedConfig) -> AdvancedConfig {
    let raw = raw.unwrap_or_default();
    AdvancedConfig {
        aliases: raw.aliases.unwrap_or_else(|| defaults.aliases.clone()),
        git: raw.git.unwrap_or_else(|| defaults.git.clone()),
        shortcuts: raw.shortcuts.unwrap_or_else(|| defaults.shortcuts.clone()),
    }
}

////////////////////////////////////////////////////////////////////////////////
// RAW
////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBehavior {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_emoji_detection: Option<EmojiDetection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_scope_for: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_scopes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibited_words: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prohibited_words_body: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAdvanced {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<ShortcutsConfig>,
}

/// The configuration file as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RawBehavior>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RawFormat>,
    pub types: Vec<CommitType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<RawValidation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<RawAdvanced>,
}

impl From<&Config> for RawConfig {
    /// Fully-specified raw form of a merged config.
    fn from(config: &Config) -> Self {
        Self {
            version: Some(config.version.clone()),
            config: Some(RawBehavior {
                emoji_enabled: Some(config.config.emoji_enabled),
                force_emoji_detection: Some(config.config.force_emoji_detection),
            }),
            format: Some(RawFormat {
                template: Some(config.format.template.clone()),
                subject_max_length: Some(config.format.subject_max_length),
                body: Some(config.format.body.clone()),
            }),
            types: config.types.clone(),
            validation: Some(RawValidation {
                require_scope_for: Some(config.validation.require_scope_for.clone()),
                allowed_scopes: Some(config.validation.allowed_scopes.clone()),
                subject_min_length: Some(config.validation.subject_min_length),
                prohibited_words: Some(config.validation.prohibited_words.clone()),
                prohibited_words_body: Some(config.validation.prohibited_words_body.clone()),
            }),
            advanced: Some(RawAdvanced {
                aliases: Some(config.advanced.aliases.clone()),
                git: Some(config.advanced.git.clone()),
                shortcuts: Some(config.advanced.shortcuts.clone()),
            }),
        }
    }
}

/// Shape of the keys the loader understands.
enum Schema {
    /// Any value; user-named keys such as aliases or shortcut letters.
    Any,
    Fields(&'static [(&'static str, Schema)]),
    /// A sequence whose entries all follow the inner schema.
    Each(&'static Schema),
}

const PROMPT_SHORTCUT: Schema = Schema::Fields(&[("mapping", Schema::Any)]);

const CONFIG_SCHEMA: Schema = Schema::Fields(&[
    ("version", Schema::Any),
    (
        "config",
        Schema::Fields(&[("emoji_enabled", Schema::Any), ("force_emoji_detection", Schema::Any)]),
    ),
    (
        "format",
        Schema::Fields(&[
            ("template", Schema::Any),
            ("subject_max_length", Schema::Any),
            (
                "body",
                Schema::Fields(&[
                    ("required", Schema::Any),
                    ("min_length", Schema::Any),
                    ("max_length", Schema::Any),
                    ("editor_preference", Schema::Any),
                ]),
            ),
        ]),
    ),
    (
        "types",
        Schema::Each(&Schema::Fields(&[
            ("id", Schema::Any),
            ("description", Schema::Any),
            ("emoji", Schema::Any),
        ])),
    ),
    (
        "validation",
        Schema::Fields(&[
            ("require_scope_for", Schema::Any),
            ("allowed_scopes", Schema::Any),
            ("subject_min_length", Schema::Any),
            ("prohibited_words", Schema::Any),
            ("prohibited_words_body", Schema::Any),
        ]),
    ),
    (
        "advanced",
        Schema::Fields(&[
            ("aliases", Schema::Any),
            (
                "git",
                Schema::Fields(&[("auto_stage", Schema::Any), ("sign_commits", Schema::Any)]),
            ),
            (
                "shortcuts",
                Schema::Fields(&[
                    ("enabled", Schema::Any),
                    ("display_hints", Schema::Any),
                    (
                        "prompts",
                        Schema::Fields(&[
                            ("type", PROMPT_SHORTCUT),
                            ("preview", PROMPT_SHORTCUT),
                            ("body", PROMPT_SHORTCUT),
                        ]),
                    ),
                ]),
            ),
        ]),
    ),
]);

/// Dotted paths of keys the loader does not understand and will ignore.
/// Entries of `types` appear as `types[<index>].<key>`.
#[must_use]
pub fn unknown_fields(value: &Value) -> Vec<String> {
    let mut unknown = Vec::new();
    collect_unknown(&CONFIG_SCHEMA, value, "", &mut unknown);
    unknown
}

fn collect_unknown(schema: &Schema, value: &Value, path: &str, unknown: &mut Vec<String>) {
    match (schema, value) {
        (Schema::Fields(known), Value::Mapping(fields)) => {
            for (key, child) in fields {
                let name = key.as_str().map_or_else(|| format!("{key:?}"), str::to_string);
                let child_path = if path.is_empty() {
                    name.clone()
                } else {
                    format!("{path}.{name}")
                };
                match known.iter().find(|(field, _)| *field == name) {
                    Some((_, inner)) => collect_unknown(inner, child, &child_path, unknown),
                    None => unknown.push(child_path),
                }
            }
        }
        (Schema::Each(inner), Value::Sequence(items)) => {
            for (idx, item) in items.iter().enumerate() {
                collect_unknown(inner, item, &format!("{path}[{idx}]"), unknown);
            }
        }
        // Wrong-typed values are reported by the validator.
        _ => {}
    }
}
