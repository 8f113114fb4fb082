//! Structural validation of a parsed configuration document.
//!
//! The validator walks the raw YAML value and collects every defect in one
//! pass; nothing short-circuits except a non-object root.

use std::collections::{BTreeMap, BTreeSet};

use bon::Builder;
use serde_yaml::{Mapping, Value};

/// One defect found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ValidationError {
    /// Technical path, e.g. `types[0].id`
    #[builder(into)]
    pub field: String,
    /// Human-readable field name
    #[builder(into)]
    pub field_display: String,
    /// Technical message
    #[builder(into)]
    pub message: String,
    /// Message shown to the user
    #[builder(into)]
    pub user_message: String,
    /// Offending value, rendered
    #[builder(into)]
    pub value: Option<String>,
    #[builder(into)]
    pub expected_format: Option<String>,
    #[builder(default)]
    pub examples: Vec<String>,
    /// Concrete problem description
    #[builder(into)]
    pub issue: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

const SHORTCUT_PROMPTS: &[&str] = &["type", "preview", "body"];
const OBJECT_SECTIONS: &[(&str, &str)] = &[
    ("config", "Behavior settings"),
    ("format", "Message format"),
    ("validation", "Validation rules"),
    ("advanced", "Advanced settings"),
];

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a parsed document, accumulating every error found.
    #[must_use]
    pub fn validate(document: &Value) -> ValidationResult {
        let Some(root) = document.as_mapping() else {
            let found = describe(document);
            return ValidationResult::from_errors(vec![
                ValidationError::builder()
                    .field("(root)")
                    .field_display("Configuration")
                    .message("configuration root must be an object")
                    .user_message("The configuration must be a set of key/value pairs")
                    .value(found)
                    .expected_format("YAML object with `version` and `types` keys")
                    .issue(if document.is_sequence() {
                        "Top level is an array"
                    } else {
                        "Top level is not an object"
                    })
                    .build(),
            ]);
        };

        let mut errors = Vec::new();
        check_version(root, &mut errors);
        check_types(root, &mut errors);
        for (section, display) in OBJECT_SECTIONS {
            check_section(root, section, display, &mut errors);
        }
        check_shortcuts(root, &mut errors);

        ValidationResult::from_errors(errors)
    }
}

fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn check_version(root: &Mapping, errors: &mut Vec<ValidationError>) {
    if let Some(version) = get(root, "version")
        && !version.is_string()
    {
        errors.push(
            ValidationError::builder()
                .field("version")
                .field_display("Version")
                .message("version must be a string")
                .user_message("The version must be a quoted string")
                .value(describe(version))
                .expected_format("quoted string")
                .examples(vec!["\"1.0\"".to_string()])
                .issue("Unquoted numbers are parsed as numbers")
                .build(),
        );
    }
}

fn check_section(root: &Mapping, key: &str, display: &str, errors: &mut Vec<ValidationError>) {
    if let Some(section) = get(root, key)
        && !section.is_mapping()
    {
        errors.push(
            ValidationError::builder()
                .field(key)
                .field_display(display)
                .message(format!("{key} must be an object"))
                .user_message(format!("`{key}` must contain key/value settings"))
                .value(describe(section))
                .expected_format("YAML object")
                .issue(format!("Found {} instead of an object", kind(section)))
                .build(),
        );
    }
}

fn check_types(root: &Mapping, errors: &mut Vec<ValidationError>) {
    let Some(types) = root.get("types") else {
        errors.push(
            ValidationError::builder()
                .field("types")
                .field_display("Commit types")
                .message("types is required")
                .user_message("Define at least one commit type")
                .expected_format("array of {id, description, emoji?}")
                .issue("Missing required field")
                .build(),
        );
        return;
    };

    let Some(list) = types.as_sequence() else {
        errors.push(
            ValidationError::builder()
                .field("types")
                .field_display("Commit types")
                .message("types must be an array")
                .user_message("`types` must be a list of commit types")
                .value(describe(types))
                .expected_format("array of {id, description, emoji?}")
                .issue(format!("Found {} instead of an array", kind(types)))
                .build(),
        );
        return;
    };

    if list.is_empty() {
        errors.push(
            ValidationError::builder()
                .field("types")
                .field_display("Commit types")
                .message("types must not be empty")
                .user_message("Define at least one commit type")
                .value("[]")
                .expected_format("array with at least one entry")
                .examples(vec!["feat".to_string(), "fix".to_string()])
                .issue("Empty types array")
                .build(),
        );
        return;
    }

    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    for (idx, entry) in list.iter().enumerate() {
        check_type_entry(idx, entry, &mut seen, errors);
    }
}

fn check_type_entry(
    idx: usize,
    entry: &Value,
    seen: &mut BTreeMap<String, usize>,
    errors: &mut Vec<ValidationError>,
) {
    let path = format!("types[{idx}]");
    let display = format!("Commit type #{}", idx.saturating_add(1));

    let Some(map) = entry.as_mapping() else {
        errors.push(
            ValidationError::builder()
                .field(path.as_str())
                .field_display(display.as_str())
                .message(format!("{path} must be an object"))
                .user_message("Each commit type needs an id and a description")
                .value(describe(entry))
                .expected_format("{id, description, emoji?}")
                .issue(format!("Found {} instead of an object", kind(entry)))
                .build(),
        );
        return;
    };

    match get(map, "id") {
        None => errors.push(
            ValidationError::builder()
                .field(format!("{path}.id"))
                .field_display(format!("{display} id"))
                .message("id is required")
                .user_message("Every commit type needs an id")
                .expected_format("lowercase letters only (a-z)")
                .examples(vec!["feat".to_string(), "fix".to_string()])
                .issue("Missing required field 'id'")
                .build(),
        ),
        Some(Value::String(id)) => check_type_id(&path, &display, id, idx, seen, errors),
        Some(other) => errors.push(
            ValidationError::builder()
                .field(format!("{path}.id"))
                .field_display(format!("{display} id"))
                .message("id must be a string")
                .user_message("The id must be a word such as feat")
                .value(describe(other))
                .expected_format("lowercase letters only (a-z)")
                .issue(format!("Found {} instead of a string", kind(other)))
                .build(),
        ),
    }

    match get(map, "description") {
        None => errors.push(
            ValidationError::builder()
                .field(format!("{path}.description"))
                .field_display(format!("{display} description"))
                .message("description is required")
                .user_message("Every commit type needs a description")
                .expected_format("non-empty string")
                .issue("Missing required field 'description'")
                .build(),
        ),
        Some(Value::String(text)) if text.trim().is_empty() => errors.push(
            ValidationError::builder()
                .field(format!("{path}.description"))
                .field_display(format!("{display} description"))
                .message("description must not be empty")
                .user_message("The description cannot be blank")
                .value(describe(&Value::String(text.clone())))
                .expected_format("non-empty string")
                .issue("Description is empty")
                .build(),
        ),
        Some(Value::String(_)) => {}
        Some(other) => errors.push(
            ValidationError::builder()
                .field(format!("{path}.description"))
                .field_display(format!("{display} description"))
                .message("description must be a string")
                .user_message("The description must be text")
                .value(describe(other))
                .expected_format("non-empty string")
                .issue(format!("Found {} instead of a string", kind(other)))
                .build(),
        ),
    }

    if let Some(emoji) = get(map, "emoji")
        && !emoji.is_string()
    {
        errors.push(
            ValidationError::builder()
                .field(format!("{path}.emoji"))
                .field_display(format!("{display} emoji"))
                .message("emoji must be a string")
                .user_message("The emoji must be a quoted string")
                .value(describe(emoji))
                .expected_format("quoted emoji character")
                .examples(vec!["\"✨\"".to_string(), "\"🐛\"".to_string()])
                .issue(format!("Found {} instead of a string", kind(emoji)))
                .build(),
        );
    }
}

fn check_type_id(
    path: &str,
    display: &str,
    id: &str,
    idx: usize,
    seen: &mut BTreeMap<String, usize>,
    errors: &mut Vec<ValidationError>,
) {
    let field = format!("{path}.id");
    let field_display = format!("{display} id");

    if id.is_empty() {
        errors.push(
            ValidationError::builder()
                .field(field)
                .field_display(field_display)
                .message("id must not be empty")
                .user_message("The id cannot be blank")
                .value("\"\"")
                .expected_format("lowercase letters only (a-z)")
                .examples(vec!["feat".to_string(), "fix".to_string()])
                .issue("Empty id")
                .build(),
        );
        return;
    }

    if let Some(issue) = invalid_id_characters(id) {
        let mut examples: Vec<String> = Vec::new();
        let suggestion = suggest_id(id);
        if !suggestion.is_empty() {
            examples.push(suggestion);
        }
        examples.extend(["feat", "fix", "docs"].iter().map(ToString::to_string));
        examples.dedup();

        errors.push(
            ValidationError::builder()
                .field(field)
                .field_display(field_display)
                .message(format!("id '{id}' does not match ^[a-z]+$"))
                .user_message(format!("The id \"{id}\" can only contain lowercase letters"))
                .value(format!("\"{id}\""))
                .expected_format("lowercase letters only (a-z)")
                .examples(examples)
                .issue(issue)
                .build(),
        );
        return;
    }

    if let Some(first) = seen.get(id) {
        errors.push(
            ValidationError::builder()
                .field(field)
                .field_display(field_display)
                .message(format!("duplicate type id '{id}'"))
                .user_message(format!("The id \"{id}\" is used more than once"))
                .value(format!("\"{id}\""))
                .expected_format("unique id")
                .issue(format!("Duplicate of types[{first}].id"))
                .build(),
        );
        return;
    }
    seen.insert(id.to_string(), idx);
}

/// Character classes that can break the `^[a-z]+$` id rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Uppercase,
    Dash,
    Underscore,
    Number,
    Space,
    Other,
}

impl CharClass {
    fn of(c: char) -> Option<Self> {
        match c {
            'a'..='z' => None,
            c if c.is_uppercase() => Some(Self::Uppercase),
            '-' => Some(Self::Dash),
            '_' => Some(Self::Underscore),
            c if c.is_numeric() => Some(Self::Number),
            c if c.is_whitespace() => Some(Self::Space),
            _ => Some(Self::Other),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase letters",
            Self::Dash => "dashes",
            Self::Underscore => "underscores",
            Self::Number => "numbers",
            Self::Space => "spaces",
            Self::Other => "special characters",
        }
    }
}

/// Describes the offending characters of `id` by class, or `None` if valid.
fn invalid_id_characters(id: &str) -> Option<String> {
    let mut found: BTreeMap<CharClass, BTreeSet<char>> = BTreeMap::new();
    for c in id.chars() {
        if let Some(class) = CharClass::of(c) {
            found.entry(class).or_default().insert(c);
        }
    }

    if found.is_empty() {
        return None;
    }

    let parts: Vec<String> = found
        .into_iter()
        .map(|(class, chars)| {
            let shown: Vec<String> = chars
                .into_iter()
                .map(|c| if c.is_whitespace() { "' '".to_string() } else { format!("'{c}'") })
                .collect();
            format!("{} ({})", class.label(), shown.join(", "))
        })
        .collect();

    Some(format!("Contains {}", parts.join(", ")))
}

fn suggest_id(id: &str) -> String {
    id.chars()
        .filter_map(|c| {
            let lower = c.to_ascii_lowercase();
            lower.is_ascii_lowercase().then_some(lower)
        })
        .collect()
}

fn check_shortcuts(root: &Mapping, errors: &mut Vec<ValidationError>) {
    let Some(shortcuts) = get(root, "advanced")
        .and_then(Value::as_mapping)
        .and_then(|advanced| get(advanced, "shortcuts"))
    else {
        return;
    };

    let Some(shortcuts) = shortcuts.as_mapping() else {
        errors.push(object_error("advanced.shortcuts", "Shortcuts", shortcuts));
        return;
    };

    for flag in ["enabled", "display_hints"] {
        if let Some(value) = get(shortcuts, flag)
            && !value.is_bool()
        {
            errors.push(
                ValidationError::builder()
                    .field(format!("advanced.shortcuts.{flag}"))
                    .field_display(format!("Shortcuts {flag}"))
                    .message(format!("{flag} must be a boolean"))
                    .user_message("Use true or false")
                    .value(describe(value))
                    .expected_format("true | false")
                    .issue(format!("Found {} instead of a boolean", kind(value)))
                    .build(),
            );
        }
    }

    let Some(prompts) = get(shortcuts, "prompts") else {
        return;
    };
    let Some(prompts) = prompts.as_mapping() else {
        errors.push(object_error("advanced.shortcuts.prompts", "Shortcut prompts", prompts));
        return;
    };

    for name in SHORTCUT_PROMPTS {
        let Some(prompt) = get(prompts, name) else {
            continue;
        };
        let base = format!("advanced.shortcuts.prompts.{name}");
        let Some(prompt) = prompt.as_mapping() else {
            errors.push(object_error(&base, "Prompt shortcuts", prompt));
            continue;
        };
        let Some(mapping) = get(prompt, "mapping") else {
            continue;
        };
        let mapping_path = format!("{base}.mapping");
        let Some(mapping) = mapping.as_mapping() else {
            errors.push(object_error(&mapping_path, "Shortcut mapping", mapping));
            continue;
        };
        check_shortcut_mapping(&mapping_path, mapping, errors);
    }
}

fn check_shortcut_mapping(path: &str, mapping: &Mapping, errors: &mut Vec<ValidationError>) {
    let mut used: BTreeSet<char> = BTreeSet::new();

    for (key, value) in mapping {
        let key_text = key.as_str().map_or_else(|| describe(key), ToString::to_string);
        let field = format!("{path}.{key_text}");

        let mut chars = key_text.chars();
        let letter = match (key.as_str().and(chars.next()), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_lowercase(),
            _ => {
                errors.push(
                    ValidationError::builder()
                        .field(field.as_str())
                        .field_display("Shortcut key")
                        .message("shortcut key must be a single letter")
                        .user_message(format!("\"{key_text}\" is not a single letter"))
                        .value(format!("\"{key_text}\""))
                        .expected_format("one letter a-z")
                        .examples(vec!["f".to_string(), "x".to_string()])
                        .issue("Invalid shortcut key")
                        .build(),
                );
                continue;
            }
        };

        if !used.insert(letter) {
            errors.push(
                ValidationError::builder()
                    .field(field.as_str())
                    .field_display("Shortcut key")
                    .message(format!("duplicate shortcut key '{letter}'"))
                    .user_message(format!("The key \"{letter}\" is assigned more than once"))
                    .value(format!("\"{key_text}\""))
                    .expected_format("each key used once per prompt")
                    .issue("Duplicate shortcut key (keys are case-insensitive)")
                    .build(),
            );
        }

        if !value.is_string() {
            errors.push(
                ValidationError::builder()
                    .field(field.as_str())
                    .field_display("Shortcut target")
                    .message("shortcut target must be a string")
                    .user_message("Map each key to an option value")
                    .value(describe(value))
                    .expected_format("option value, e.g. a type id")
                    .issue(format!("Found {} instead of a string", kind(value)))
                    .build(),
            );
        }
    }
}

fn object_error(field: &str, display: &str, value: &Value) -> ValidationError {
    ValidationError::builder()
        .field(field)
        .field_display(display)
        .message(format!("{field} must be an object"))
        .user_message(format!("`{field}` must contain key/value settings"))
        .value(describe(value))
        .expected_format("YAML object")
        .issue(format!("Found {} instead of an object", kind(value)))
        .build()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "an array",
        Value::Mapping(_) => "an object",
        Value::Tagged(_) => "a tagged value",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Sequence(items) => format!("array ({} items)", items.len()),
        Value::Mapping(_) => "object".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
    }
}
