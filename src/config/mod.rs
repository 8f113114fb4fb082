pub mod defaults;
mod emoji;
mod error;
mod loader;
pub mod presets;
pub mod root;
mod types;
mod validator;

pub use emoji::{emoji_mode_active, terminal_supports_emoji};
pub use error::ConfigError;
pub use loader::{
    CACHE_LIMIT, CachedConfig, ConfigLoader, ConfigSource, LoadedConfig, find_config_file,
    load_config, read_config,
};
pub use root::{ProjectRoot, RootMarker};
pub use types::{
    AdvancedConfig, BehaviorConfig, BodyConfig, CommitType, Config, EditorPreference,
    EmojiDetection, FormatConfig, GitConfig, PromptShortcutConfig, PromptShortcuts, RawAdvanced,
    RawBehavior, RawConfig, RawFormat, RawValidation, ShortcutsConfig, ValidationRules,
    unknown_fields,
};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
