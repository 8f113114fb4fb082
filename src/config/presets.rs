//! Embedded starter configurations used by `init`.

use anyhow::{Context, Result, anyhow};
use rust_embed::Embed;

use super::types::RawConfig;

#[derive(Embed)]
#[folder = "resources/presets/"]
#[include = "*.yaml"]
struct PresetAssets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        id: "conventional",
        name: "Conventional Commits",
        description: "feat, fix, docs and friends from conventionalcommits.org",
    },
    Preset {
        id: "gitmoji",
        name: "Gitmoji",
        description: "Conventional types with emoji prefixes",
    },
    Preset {
        id: "minimal",
        name: "Minimal",
        description: "Just feat, fix and chore",
    },
];

pub const DEFAULT_PRESET: &str = "conventional";

#[must_use]
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Raw YAML text of a preset.
pub fn preset_source(id: &str) -> Result<String> {
    let file = PresetAssets::get(&format!("{id}.yaml"))
        .ok_or_else(|| anyhow!("unknown preset: {id}"))?;
    String::from_utf8(file.data.into_owned()).with_context(|| format!("preset {id} is not UTF-8"))
}

pub fn load_preset(id: &str) -> Result<RawConfig> {
    let source = preset_source(id)?;
    serde_yaml::from_str(&source).with_context(|| format!("invalid preset: {id}"))
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::*;
    use crate::config::validator::ConfigValidator;

    #[test]
    fn test_every_preset_is_embedded_and_valid() {
        for preset in PRESETS {
            let source = preset_source(preset.id).unwrap();
            let value: Value = serde_yaml::from_str(&source).unwrap();
            let result = ConfigValidator::validate(&value);
            assert!(result.valid, "{}: {:?}", preset.id, result.errors);

            let raw = load_preset(preset.id).unwrap();
            assert!(!raw.types.is_empty());
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(find_preset("angular").is_none());
        assert!(load_preset("angular").is_err());
    }

    #[test]
    fn test_default_preset_exists() {
        assert!(find_preset(DEFAULT_PRESET).is_some());
    }
}
