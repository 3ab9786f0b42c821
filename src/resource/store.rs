//! Resource store contract and the in-memory implementation.

use super::LanguageResource;

/// Source of language resources consumed by the catalog and the resolver.
///
/// Where the resources physically live is up to the implementation.
pub trait ResourceStore {
    /// Every resource currently available, in the store's iteration order.
    fn resources(&self) -> &[LanguageResource];

    /// Raw content of the language with the given key, if any.
    ///
    /// When several resources share a key, the last one in iteration order wins.
    fn content(&self, key: &str) -> Option<&str> {
        self.resources()
            .iter()
            .rev()
            .find(|resource| resource.key() == key)
            .map(LanguageResource::raw_content)
    }
}

impl<T: ResourceStore + ?Sized> ResourceStore for &T {
    fn resources(&self) -> &[LanguageResource] {
        (**self).resources()
    }

    fn content(&self, key: &str) -> Option<&str> {
        (**self).content(key)
    }
}

/// Resource store backed by a vector held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    resources: Vec<LanguageResource>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { resources: Vec::new() }
    }

    /// Appends a resource built from `key` and `content`.
    #[must_use]
    pub fn with_language(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(LanguageResource::new(key, content));
        self
    }

    /// Appends `resource`; a later duplicate key shadows earlier ones.
    pub fn insert(&mut self, resource: LanguageResource) {
        self.resources.push(resource);
    }
}

impl ResourceStore for MemoryStore {
    fn resources(&self) -> &[LanguageResource] {
        &self.resources
    }
}

impl FromIterator<LanguageResource> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = LanguageResource>>(iter: I) -> Self {
        Self { resources: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn content_returns_raw_text() {
        let store = MemoryStore::new().with_language("en_US", "hello=Hello");

        expect_that!(store.content("en_US"), some(eq("hello=Hello")));
        expect_that!(store.content("ja_JP"), none());
    }

    #[googletest::test]
    fn content_prefers_last_duplicate() {
        let store =
            MemoryStore::new().with_language("en_US", "hello=Old").with_language("en_US", "hello=New");

        expect_that!(store.content("en_US"), some(eq("hello=New")));
    }

    #[googletest::test]
    fn borrowed_store_delegates() {
        let store = MemoryStore::new().with_language("fr_FR", "hello=Bonjour");
        let borrowed = &store;

        expect_that!(borrowed.content("fr_FR"), some(eq("hello=Bonjour")));
        expect_that!(borrowed.resources().len(), eq(1));
    }
}
