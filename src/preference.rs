//! Remembered language selection.

use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to access preference file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse preference file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// On-disk shape of the preference file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredPreference {
    /// Key of the last selected language.
    language: String,
}

/// JSON file remembering the last selected language key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceFile {
    path: PathBuf,
}

impl PreferenceFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the remembered key. A missing file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<String>, PreferenceError> {
        if !self.path.exists() {
            tracing::debug!("Preference file not found: {:?}", self.path);
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let stored: StoredPreference = serde_json::from_str(&content)?;
        let language = stored.language.trim();

        Ok((!language.is_empty()).then(|| language.to_string()))
    }

    /// Writes `language` as the remembered key, creating parent directories.
    pub fn save(&self, language: &str) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            serde_json::to_string_pretty(&StoredPreference { language: language.to_string() })?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(language = %language, "Saved language preference to {:?}", self.path);

        Ok(())
    }
}
