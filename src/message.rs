//! Commit message assembly and rule checks.

use crate::config::Config;

/// The user's answers for one commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitMessage {
    pub type_id: String,
    pub scope: Option<String>,
    pub subject: String,
    pub body: Option<String>,
}

impl CommitMessage {
    /// Header line rendered through `format.template`.
    ///
    /// An empty scope removes the `({scope})` group. The type's emoji and a
    /// trailing space are inserted only when `emoji_active` is set.
    #[must_use]
    pub fn header(&self, config: &Config, emoji_active: bool) -> String {
        let emoji = if emoji_active {
            config
                .find_type(&self.type_id)
                .and_then(|t| t.emoji.as_deref())
                .map(|e| format!("{e} "))
                .unwrap_or_default()
        } else {
            String::new()
        };

        let scope = self.scope.as_deref().map(str::trim).unwrap_or_default();
        let mut line = config.format.template.clone();
        if scope.is_empty() {
            line = line.replace("({scope})", "");
        }

        line.replace("{emoji}", &emoji)
            .replace("{type}", &self.type_id)
            .replace("{scope}", scope)
            .replace("{subject}", self.subject.trim())
    }

    /// Header plus a blank line and the body, if any.
    #[must_use]
    pub fn render(&self, config: &Config, emoji_active: bool) -> String {
        let header = self.header(config, emoji_active);
        match self.body.as_deref().map(str::trim) {
            Some(body) if !body.is_empty() => format!("{header}\n\n{body}"),
            _ => header,
        }
    }

    /// Every rule violation in this message.
    #[must_use]
    pub fn problems(&self, config: &Config) -> Vec<String> {
        let mut problems = Vec::new();
        if config.find_type(&self.type_id).is_none() {
            problems.push(format!("Unknown commit type '{}'", self.type_id));
        }
        problems.extend(check_scope(config, &self.type_id, self.scope.as_deref().unwrap_or("")));
        problems.extend(check_subject(config, &self.subject));
        problems.extend(check_body(config, self.body.as_deref().unwrap_or("")));
        problems
    }
}

pub fn check_scope(config: &Config, type_id: &str, scope: &str) -> Option<String> {
    let scope = scope.trim();
    let rules = &config.validation;

    if scope.is_empty() {
        return rules
            .require_scope_for
            .iter()
            .any(|t| t == type_id)
            .then(|| format!("A scope is required for '{type_id}' commits"));
    }

    if !rules.allowed_scopes.is_empty() && !rules.allowed_scopes.iter().any(|s| s == scope) {
        return Some(format!(
            "Scope '{scope}' is not allowed (allowed: {})",
            rules.allowed_scopes.join(", ")
        ));
    }
    None
}

pub fn check_subject(config: &Config, subject: &str) -> Option<String> {
    let subject = subject.trim();
    let length = subject.chars().count();

    if subject.is_empty() {
        return Some("Subject cannot be empty".to_string());
    }
    if length < config.validation.subject_min_length {
        return Some(format!(
            "Subject must be at least {} characters",
            config.validation.subject_min_length
        ));
    }
    if length > config.format.subject_max_length {
        return Some(format!(
            "Subject is {length} characters, maximum is {}",
            config.format.subject_max_length
        ));
    }
    find_prohibited(subject, &config.validation.prohibited_words)
        .map(|word| format!("Subject contains prohibited word '{word}'"))
}

pub fn check_body(config: &Config, body: &str) -> Option<String> {
    let body = body.trim();
    let rules = &config.format.body;
    let length = body.chars().count();

    if body.is_empty() {
        return rules.required.then(|| "A commit body is required".to_string());
    }
    if length < rules.min_length {
        return Some(format!("Body must be at least {} characters", rules.min_length));
    }
    if let Some(max) = rules.max_length
        && length > max
    {
        return Some(format!("Body is {length} characters, maximum is {max}"));
    }
    find_prohibited(body, &config.validation.prohibited_words_body)
        .map(|word| format!("Body contains prohibited word '{word}'"))
}

/// First entry of `words` found in `text`, case-insensitively.
///
/// Single words match whole tokens only; phrases match as substrings.
#[must_use]
pub fn find_prohibited<'a>(text: &str, words: &'a [String]) -> Option<&'a str> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .collect();

    words.iter().map(String::as_str).find(|word| {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            false
        } else if word.contains(char::is_whitespace) {
            lowered.contains(&word)
        } else {
            tokens.contains(&word.as_str())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::fallback_config;

    fn message(scope: Option<&str>, subject: &str) -> CommitMessage {
        CommitMessage {
            type_id: "feat".to_string(),
            scope: scope.map(String::from),
            subject: subject.to_string(),
            body: None,
        }
    }

    #[test]
    fn test_header_with_scope_and_emoji() {
        let config = fallback_config();
        let msg = message(Some("api"), "add endpoint");
        assert_eq!(msg.header(&config, true), "✨ feat(api): add endpoint");
        assert_eq!(msg.header(&config, false), "feat(api): add endpoint");
    }

    #[test]
    fn test_header_without_scope_drops_parentheses() {
        let config = fallback_config();
        assert_eq!(message(None, "add endpoint").header(&config, false), "feat: add endpoint");
        assert_eq!(message(Some("  "), "x").header(&config, false), "feat: x");
    }

    #[test]
    fn test_custom_template() {
        let mut config = fallback_config();
        config.format.template = "[{type}] {subject} ({scope})".to_string();
        assert_eq!(message(Some("ui"), "fix").header(&config, true), "[feat] fix (ui)");
        assert_eq!(message(None, "fix").header(&config, true), "[feat] fix ");
    }

    #[test]
    fn test_render_appends_body() {
        let config = fallback_config();
        let mut msg = message(None, "add parser");
        msg.body = Some("  Handles nested input.\n".to_string());
        assert_eq!(msg.render(&config, false), "feat: add parser\n\nHandles nested input.");
    }

    #[test]
    fn test_subject_rules() {
        let mut config = fallback_config();
        config.validation.prohibited_words = vec!["wip".to_string()];

        assert!(check_subject(&config, "  ").is_some());
        assert!(check_subject(&config, "ab").unwrap().contains("at least 3"));
        assert!(check_subject(&config, &"x".repeat(51)).unwrap().contains("maximum is 50"));
        assert!(check_subject(&config, "WIP parser").unwrap().contains("'wip'"));
        assert!(check_subject(&config, "wipe cache").is_none());
    }

    #[test]
    fn test_scope_rules() {
        let mut config = fallback_config();
        config.validation.require_scope_for = vec!["feat".to_string()];
        config.validation.allowed_scopes = vec!["api".to_string()];

        assert!(check_scope(&config, "feat", "").is_some());
        assert!(check_scope(&config, "fix", "").is_none());
        assert!(check_scope(&config, "fix", "db").unwrap().contains("allowed: api"));
        assert!(check_scope(&config, "feat", "api").is_none());
    }

    #[test]
    fn test_body_rules() {
        let mut config = fallback_config();
        assert!(check_body(&config, "").is_none());

        config.format.body.required = true;
        config.format.body.min_length = 10;
        config.format.body.max_length = Some(20);
        config.validation.prohibited_words_body = vec!["do not merge".to_string()];

        assert!(check_body(&config, "").is_some());
        assert!(check_body(&config, "short").unwrap().contains("at least 10"));
        assert!(check_body(&config, &"y".repeat(21)).unwrap().contains("maximum is 20"));
        assert!(check_body(&config, "Do Not  Merge yet").is_none());
        assert!(check_body(&config, "do not merge yet").is_some());
    }

    #[test]
    fn test_problems_collects_everything() {
        let config = fallback_config();
        let msg = CommitMessage {
            type_id: "nope".to_string(),
            scope: None,
            subject: "x".to_string(),
            body: None,
        };
        assert_eq!(msg.problems(&config).len(), 2);
    }
}
