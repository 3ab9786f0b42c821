use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Key loaded at startup and returned by name lookups that miss, unless configured otherwise.
pub const DEFAULT_LANGUAGE_KEY: &str = "en_US";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "resources.includePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizationSettings {
    pub resources: ResourcesConfig,

    /// Language loaded at startup when no remembered selection applies.
    pub default_language: String,

    /// Key returned when a display name cannot be resolved to a language.
    pub fallback_language: String,

    /// Persist the last selected language and prefer it on the next startup.
    pub remember_language: bool,

    /// Path of the remembered-language file, relative to the workspace root.
    pub preference_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcesConfig {
    /// Directory holding the language files, relative to the workspace root.
    pub directory: String,
    /// Glob patterns relative to `directory`.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            directory: "languages".to_string(),
            include_patterns: vec!["**/*.lang".to_string(), "**/*.txt".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl LocalizationSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.resources.directory.trim().is_empty() {
            errors.push(ValidationError::new(
                "resources.directory",
                "The directory cannot be empty. Example: \"languages\"",
            ));
        }

        if self.resources.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "resources.includePatterns",
                "At least one pattern is required. Example: [\"**/*.lang\"]",
            ));
        }

        for (index, pattern) in self.resources.include_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("resources.includePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, pattern) in self.resources.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("resources.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.default_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language key cannot be empty. Example: \"en_US\"",
            ));
        }

        if self.fallback_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The language key cannot be empty. Example: \"en_US\"",
            ));
        }

        if self.remember_language && self.preference_file.trim().is_empty() {
            errors.push(ValidationError::new(
                "preferenceFile",
                "A file path is required while 'rememberLanguage' is enabled. Set a path, or disable 'rememberLanguage'",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for LocalizationSettings {
    fn default() -> Self {
        Self {
            resources: ResourcesConfig::default(),
            default_language: DEFAULT_LANGUAGE_KEY.to_string(),
            fallback_language: DEFAULT_LANGUAGE_KEY.to_string(),
            remember_language: true,
            preference_file: ".localization-state.json".to_string(),
        }
    }
}
