//! Workspace settings: reads `.localization.json` and resolves paths against the workspace root.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LocalizationSettings,
};

/// Name of the configuration file looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".localization.json";

/// Holds the active settings and where they came from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Settings in effect.
    current_settings: LocalizationSettings,

    /// Workspace root the settings were loaded for.
    workspace_root: Option<PathBuf>,

    /// Configuration file the settings were read from, if any.
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Creates a manager holding the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings for `workspace_root`.
    ///
    /// Without a root, or without a config file in it, the defaults apply.
    /// On error the previous settings are kept.
    ///
    /// # Errors
    /// - the config file exists but cannot be read
    /// - invalid JSON
    /// - validation failures
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let found = match &workspace_root {
            Some(root) => read_config_file(&root.join(CONFIG_FILE_NAME))?,
            None => None,
        };
        let (config_path, settings) = match found {
            Some((path, settings)) => (Some(path), settings),
            None => (None, LocalizationSettings::default()),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        self.config_path = config_path;
        tracing::debug!("Settings loaded: {:?}", self.current_settings);

        Ok(())
    }

    /// Settings in effect.
    #[must_use]
    pub const fn get_settings(&self) -> &LocalizationSettings {
        &self.current_settings
    }

    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }

    /// Config file the current settings came from; `None` means defaults.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Resolves a settings path against the workspace root (or the current directory).
    #[must_use]
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.workspace_root.as_deref().unwrap_or_else(|| Path::new(".")).join(relative)
    }

    /// Directory scanned for language files.
    #[must_use]
    pub fn resources_dir(&self) -> PathBuf {
        self.resolve_path(&self.current_settings.resources.directory)
    }

    /// Remembered-language file, or `None` when remembering is disabled.
    #[must_use]
    pub fn preference_path(&self) -> Option<PathBuf> {
        self.current_settings
            .remember_language
            .then(|| self.resolve_path(&self.current_settings.preference_file))
    }
}

/// Parses the config file at `path`. A missing file is `Ok(None)`.
fn read_config_file(path: &Path) -> Result<Option<(PathBuf, LocalizationSettings)>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found: {:?}", path);
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };

    tracing::debug!("Loading configuration from: {:?}", path);
    let settings: LocalizationSettings = serde_json::from_str(&content)?;

    Ok(Some((path.to_path_buf(), settings)))
}
