//! Localization settings: `.localization.json` loading, validation and file matching.

/// Configuration manager
mod manager;
/// Language resource file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use manager::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
pub use matcher::{
    MatcherError,
    ResourceMatcher,
};
pub use types::{
    ConfigError,
    DEFAULT_LANGUAGE_KEY,
    LocalizationSettings,
    ResourcesConfig,
    ValidationError,
};
