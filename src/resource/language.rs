//! Language resource record and display-name extraction.

use std::path::Path;

/// Header directive declaring a language's display name on the first line.
pub const NAME_DIRECTIVE: &str = "name=";

/// Strips a leading UTF-8 byte order mark.
pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Extracts the display name from a `name=<value>` first-line header.
///
/// Returns `None` when the first line is not a name header. The returned
/// value is trimmed and may be empty.
///
/// # Examples
/// ```
/// use runtime_localization::resource::extract_display_name;
///
/// assert_eq!(extract_display_name("name= English \nhello=Hello"), Some("English"));
/// assert_eq!(extract_display_name("hello=Hello\nname=English"), None);
/// ```
#[must_use]
pub fn extract_display_name(content: &str) -> Option<&str> {
    let first_line = strip_bom(content).lines().next()?;
    first_line.trim().strip_prefix(NAME_DIRECTIVE).map(str::trim)
}

/// Derives a language key from a resource path (its file stem).
///
/// # Examples
/// - `languages/en_US.lang` → `en_US`
/// - `languages/ja_JP.txt` → `ja_JP`
#[must_use]
pub fn key_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}

/// One discoverable language: key, display name and raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageResource {
    key: String,
    display_name: String,
    raw_content: String,
}

impl LanguageResource {
    /// Builds a resource, taking the display name from the `name=` header or
    /// falling back to `key`.
    #[must_use]
    pub fn new(key: impl Into<String>, raw_content: impl Into<String>) -> Self {
        let key = key.into();
        let raw_content = raw_content.into();
        let display_name =
            extract_display_name(&raw_content).map_or_else(|| key.clone(), str::to_string);
        Self { key, display_name, raw_content }
    }

    /// Builds a resource keyed by the file stem of `path`.
    #[must_use]
    pub fn from_path(path: &Path, raw_content: impl Into<String>) -> Option<Self> {
        key_from_path(path).map(|key| Self::new(key, raw_content))
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// Returns true if both key and display name are present.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.key.is_empty() && !self.display_name.is_empty()
    }
}
