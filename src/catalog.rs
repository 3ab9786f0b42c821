//! Language catalog: which languages exist and what they are called.

use std::collections::BTreeMap;

use crate::config::DEFAULT_LANGUAGE_KEY;
use crate::resource::ResourceStore;

/// Mapping from language key to display name.
///
/// Entries iterate in key order. A refresh clears and repopulates the whole
/// mapping, so nothing from an earlier scan survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// key → display name
    languages: BTreeMap<String, String>,
    /// Key handed out when a display name is unknown.
    fallback_key: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE_KEY)
    }
}

impl Catalog {
    /// Creates an empty catalog that answers unknown names with `fallback_key`.
    #[must_use]
    pub fn new(fallback_key: impl Into<String>) -> Self {
        Self { languages: BTreeMap::new(), fallback_key: fallback_key.into() }
    }

    /// Rebuilds the mapping from every resource in `store`.
    ///
    /// Resources without a key or display name are skipped. On duplicate keys
    /// the resource later in the store's order wins.
    pub fn refresh_available_languages(&mut self, store: &dyn ResourceStore) {
        self.languages.clear();

        let resources = store.resources();
        if resources.is_empty() {
            tracing::warn!("No language resources found");
            return;
        }

        for resource in resources {
            if !resource.is_valid() {
                tracing::debug!(
                    key = %resource.key(),
                    "Skipping language resource without key or display name"
                );
                continue;
            }
            if let Some(previous) = self
                .languages
                .insert(resource.key().to_string(), resource.display_name().to_string())
            {
                tracing::debug!(key = %resource.key(), previous = %previous, "Duplicate language key replaced");
            }
        }

        if self.languages.is_empty() {
            tracing::warn!(
                "Found {} language resources, but none declared a usable key and name",
                resources.len()
            );
        } else {
            tracing::debug!("Catalog refreshed with {} languages", self.languages.len());
        }
    }

    /// Display names of every known language, ordered by key.
    #[must_use]
    pub fn available_language_names(&self) -> Vec<String> {
        self.languages.values().cloned().collect()
    }

    /// Key of the first language whose display name equals `name` exactly.
    ///
    /// Falls back to the configured fallback key, so the result is never empty
    /// unless the fallback itself is.
    #[must_use]
    pub fn language_key_from_name(&self, name: &str) -> String {
        self.languages
            .iter()
            .find(|(_, display_name)| display_name.as_str() == name)
            .map_or_else(
                || {
                    tracing::debug!(name = %name, fallback = %self.fallback_key, "Unknown language name");
                    self.fallback_key.clone()
                },
                |(key, _)| key.clone(),
            )
    }

    #[must_use]
    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.languages.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.languages.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    #[must_use]
    pub fn fallback_key(&self) -> &str {
        &self.fallback_key
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::resource::{
        LanguageResource,
        MemoryStore,
    };

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_language("ja_JP", "name=日本語\nhello=こんにちは")
            .with_language("en_US", "name=English\nhello=Hello")
            .with_language("fr_FR", "hello=Bonjour")
    }

    #[googletest::test]
    fn refresh_maps_keys_to_display_names() {
        let mut catalog = Catalog::default();

        catalog.refresh_available_languages(&sample_store());

        expect_that!(catalog.len(), eq(3));
        expect_that!(catalog.display_name("en_US"), some(eq("English")));
        expect_that!(catalog.display_name("ja_JP"), some(eq("日本語")));
        expect_that!(catalog.display_name("fr_FR"), some(eq("fr_FR")));
    }

    #[googletest::test]
    fn refresh_is_idempotent() {
        let store = sample_store();
        let mut catalog = Catalog::default();

        catalog.refresh_available_languages(&store);
        let first = catalog.clone();
        catalog.refresh_available_languages(&store);

        expect_that!(catalog, eq(&first));
    }

    #[googletest::test]
    fn refresh_drops_stale_entries() {
        let mut catalog = Catalog::default();
        catalog.refresh_available_languages(&sample_store());

        catalog.refresh_available_languages(&MemoryStore::new().with_language("de_DE", "a=b"));

        expect_that!(catalog.keys().collect::<Vec<_>>(), elements_are![eq(&"de_DE")]);
    }

    #[googletest::test]
    fn refresh_skips_invalid_resources() {
        let store: MemoryStore = [
            LanguageResource::new("", "name=Nameless"),
            LanguageResource::new("es_ES", "name=\nhola=Hola"),
            LanguageResource::new("it_IT", "name=Italiano"),
        ]
        .into_iter()
        .collect();
        let mut catalog = Catalog::default();

        catalog.refresh_available_languages(&store);

        expect_that!(catalog.available_language_names(), elements_are![eq("Italiano")]);
    }

    #[googletest::test]
    fn refresh_with_no_valid_resources_leaves_catalog_empty() {
        let store: MemoryStore = std::iter::once(LanguageResource::new("", "")).collect();
        let mut catalog = Catalog::default();
        catalog.refresh_available_languages(&sample_store());

        catalog.refresh_available_languages(&store);

        expect_that!(catalog.is_empty(), eq(true));
        catalog.refresh_available_languages(&MemoryStore::new());
        expect_that!(catalog.is_empty(), eq(true));
    }

    #[googletest::test]
    fn refresh_last_duplicate_wins() {
        let store = MemoryStore::new()
            .with_language("en_US", "name=English (old)")
            .with_language("en_US", "name=English");
        let mut catalog = Catalog::default();

        catalog.refresh_available_languages(&store);

        expect_that!(catalog.display_name("en_US"), some(eq("English")));
        expect_that!(catalog.len(), eq(1));
    }

    #[googletest::test]
    fn available_names_are_a_permutation_of_known_names() {
        let mut catalog = Catalog::default();
        catalog.refresh_available_languages(&sample_store());

        expect_that!(
            catalog.available_language_names(),
            unordered_elements_are![eq("English"), eq("日本語"), eq("fr_FR")]
        );
    }

    #[rstest]
    #[case::display_name("English", "en_US")]
    #[case::fallback_name("fr_FR", "fr_FR")]
    #[case::unicode("日本語", "ja_JP")]
    #[case::case_sensitive("english", "en_US")]
    #[case::unknown("Klingon", "en_US")]
    #[case::empty("", "en_US")]
    fn test_language_key_from_name(#[case] name: &str, #[case] expected: &str) {
        let mut catalog = Catalog::default();
        catalog.refresh_available_languages(&sample_store());

        assert_eq!(catalog.language_key_from_name(name), expected);
    }

    #[rstest]
    fn language_key_from_name_uses_configured_fallback() {
        let catalog = Catalog::new("ja_JP");

        assert_eq!(catalog.language_key_from_name("English"), "ja_JP");
        assert_eq!(catalog.fallback_key(), "ja_JP");
    }
}
