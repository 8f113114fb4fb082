//! Single-key shortcuts for select prompts.
//!
//! A [`ShortcutMapping`] is built fresh for every prompt from the configured
//! mapping for that prompt plus automatic assignment, and never changes
//! afterwards.

use std::collections::BTreeMap;

use log::debug;

/// Bidirectional key <-> option value map scoped to one prompt.
///
/// Every key is a single lowercase ASCII letter and the map is one-to-one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutMapping {
    key_to_value: BTreeMap<char, String>,
    value_to_key: BTreeMap<String, char>,
}

impl ShortcutMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the pair unless either side is already taken.
    fn claim(&mut self, key: char, value: &str) -> bool {
        if self.key_to_value.contains_key(&key) || self.value_to_key.contains_key(value) {
            return false;
        }
        self.key_to_value.insert(key, value.to_string());
        self.value_to_key.insert(value.to_string(), key);
        true
    }

    #[must_use]
    pub fn key_for(&self, value: &str) -> Option<char> {
        self.value_to_key.get(value).copied()
    }

    #[must_use]
    pub fn value_for(&self, key: char) -> Option<&str> {
        self.key_to_value.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.key_to_value.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_to_value.is_empty()
    }

    /// Pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.key_to_value.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Normalizes a configured key to a single lowercase letter.
fn normalize_key(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let first = chars.next()?.to_ascii_lowercase();
    (chars.next().is_none() && first.is_ascii_lowercase()).then_some(first)
}

/// Builds the shortcut mapping for `options`.
///
/// Configured pairs are applied first (keys lowercased, pairs whose value is
/// not an option dropped). Every remaining option then gets the first letter
/// of its own value that is still free. Options with no free letter get no
/// shortcut.
#[must_use]
pub fn auto_assign<S: AsRef<str>>(
    options: &[S],
    configured: &BTreeMap<String, String>,
) -> ShortcutMapping {
    let mut mapping = ShortcutMapping::new();

    for (key, value) in configured {
        if !options.iter().any(|o| o.as_ref() == value) {
            debug!("shortcut '{key}' targets unknown option '{value}', ignoring");
            continue;
        }
        let Some(key) = normalize_key(key) else {
            debug!("shortcut key '{key}' is not a single letter, ignoring");
            continue;
        };
        if !mapping.claim(key, value) {
            debug!("shortcut '{key}' -> '{value}' conflicts with an earlier mapping, ignoring");
        }
    }

    for option in options {
        let value = option.as_ref();
        if mapping.key_for(value).is_some() {
            continue;
        }

        let free = value
            .chars()
            .map(|c| c.to_ascii_lowercase())
            .filter(char::is_ascii_lowercase)
            .find(|c| mapping.value_for(*c).is_none());

        match free {
            Some(key) => {
                mapping.claim(key, value);
            }
            None => debug!("no free shortcut letter for option '{value}'"),
        }
    }

    mapping
}

/// Case-insensitive lookup of a typed character.
#[must_use]
pub fn match_key(input: char, mapping: &ShortcutMapping) -> Option<&str> {
    mapping.value_for(input.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_configured_key_is_respected_and_next_letter_assigned() {
        let mapping = auto_assign(&["feat", "fix"], &configured(&[("f", "feat")]));

        assert_eq!(mapping.key_for("feat"), Some('f'));
        assert_eq!(mapping.key_for("fix"), Some('i'));
        assert_eq!(match_key('x', &mapping), None);
    }

    #[test]
    fn test_auto_assignment_uses_first_free_letter() {
        let mapping = auto_assign(&["feat", "fix", "docs"], &BTreeMap::new());

        assert_eq!(mapping.key_for("feat"), Some('f'));
        assert_eq!(mapping.key_for("fix"), Some('i'));
        assert_eq!(mapping.key_for("docs"), Some('d'));
    }

    #[test]
    fn test_configured_keys_are_case_normalized() {
        let mapping = auto_assign(&["feat", "fix"], &configured(&[("X", "fix")]));

        assert_eq!(mapping.key_for("fix"), Some('x'));
        assert_eq!(match_key('X', &mapping), Some("fix"));
        assert_eq!(match_key('x', &mapping), Some("fix"));
    }

    #[test]
    fn test_configured_entries_for_unknown_options_are_dropped() {
        let mapping = auto_assign(&["feat"], &configured(&[("z", "zzz")]));

        assert_eq!(mapping.value_for('z'), None);
        assert_eq!(mapping.key_for("feat"), Some('f'));
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_multi_character_keys_are_dropped() {
        let mapping = auto_assign(&["feat"], &configured(&[("fe", "feat")]));
        assert_eq!(mapping.key_for("feat"), Some('f'));
    }

    #[test]
    fn test_option_without_free_letter_gets_no_shortcut() {
        let mapping = auto_assign(&["ab", "ba", "aab"], &BTreeMap::new());

        assert_eq!(mapping.key_for("ab"), Some('a'));
        assert_eq!(mapping.key_for("ba"), Some('b'));
        assert_eq!(mapping.key_for("aab"), None);
    }

    #[test]
    fn test_non_letters_are_never_keys() {
        let mapping = auto_assign(&["v2", "9-x"], &BTreeMap::new());

        assert_eq!(mapping.key_for("v2"), Some('v'));
        assert_eq!(mapping.key_for("9-x"), Some('x'));
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let options = ["feat", "fix", "refactor", "perf", "test", "chore"];
        let conf = configured(&[("r", "refactor"), ("t", "test")]);

        let first = auto_assign(&options, &conf);
        for _ in 0..10 {
            assert_eq!(auto_assign(&options, &conf), first);
        }
    }

    #[test]
    fn test_mapping_is_one_to_one_and_valid() {
        let options = ["feat", "fix", "fit", "ff", "docs", "dd"];
        let conf = configured(&[("d", "docs"), ("D", "dd"), ("q", "feat")]);
        let mapping = auto_assign(&options, &conf);

        let mut seen_values = std::collections::HashSet::new();
        for (key, value) in mapping.iter() {
            assert!(key.is_ascii_lowercase());
            assert!(options.contains(&value));
            assert!(seen_values.insert(value.to_string()), "value mapped twice: {value}");
            assert_eq!(mapping.key_for(value), Some(key));
        }
    }
}
