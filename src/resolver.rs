//! Translation resolver: the active language table and lookups against it.

/// Template substitution
mod format;
/// Change notification
mod notify;
/// `key=value` line parser
mod parser;

use std::collections::HashMap;

use tokio::sync::mpsc;

pub use format::{
    FormatArg,
    FormatError,
    format_template,
    missing_marker,
    missing_marker_with_args,
};
pub use notify::{
    LanguageChanged,
    NotifyError,
    SubscriberError,
    Subscribers,
    SubscriptionId,
};
pub use parser::{
    COMMENT_PREFIX,
    SEPARATOR,
    parse_entries,
    parse_line,
};

use crate::config::DEFAULT_LANGUAGE_KEY;
use crate::resource::{
    ResourceStore,
    strip_bom,
};

/// Whether a language has been loaded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    /// No language loaded; the table is empty.
    Uninitialized,
    /// At least one language has been loaded.
    Loaded,
}

/// Result of a `load_language` call that did not fail in a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The table was replaced with `entries` translations.
    Loaded { entries: usize },
    /// No resource exists for the key; nothing changed.
    KeyNotFound,
    /// The resource is empty or holds only a byte order mark; nothing changed.
    ContentEmpty,
}

impl LoadOutcome {
    /// True if the table was replaced.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Holds exactly one language's translations plus its key.
#[derive(Debug)]
pub struct Resolver {
    /// lookup key → translated text
    table: HashMap<String, String>,
    current_language: String,
    state: ResolverState,
    subscribers: Subscribers,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE_KEY)
    }
}

impl Resolver {
    /// Creates an uninitialized resolver reporting `default_language` as current.
    #[must_use]
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            table: HashMap::new(),
            current_language: default_language.into(),
            state: ResolverState::Uninitialized,
            subscribers: Subscribers::new(),
        }
    }

    /// Replaces the active table with the language `key` from `store`.
    ///
    /// A missing or empty resource leaves the current language untouched and
    /// notifies nobody. On success every subscriber is notified before this
    /// returns; a subscriber error is returned as-is, after the table has
    /// already been replaced.
    pub fn load_language(
        &mut self,
        store: &dyn ResourceStore,
        key: &str,
    ) -> Result<LoadOutcome, NotifyError> {
        let Some(content) = store.content(key) else {
            tracing::warn!(language = %key, "Language resource not found; keeping {}", self.current_language);
            return Ok(LoadOutcome::KeyNotFound);
        };
        if strip_bom(content).is_empty() {
            tracing::warn!(language = %key, "Language resource is empty; keeping {}", self.current_language);
            return Ok(LoadOutcome::ContentEmpty);
        }

        self.table.clear();
        key.clone_into(&mut self.current_language);
        for (entry_key, value) in parse_entries(content) {
            self.table.insert(entry_key.to_string(), value.to_string());
        }
        self.state = ResolverState::Loaded;

        let entries = self.table.len();
        tracing::debug!(language = %key, entries, "Language loaded");

        // Subscribers get a shared view of the resolver, so the list is
        // detached while they run.
        let mut subscribers = std::mem::take(&mut self.subscribers);
        let notified = subscribers.notify(self);
        self.subscribers = subscribers;
        notified?;
        Ok(LoadOutcome::Loaded { entries })
    }

    /// Translation for `key`, `<key>` when missing, or `""` for an empty key.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        self.lookup(key).map_or_else(|| missing_marker(key), str::to_string)
    }

    /// Translation for `key` with `args` substituted into its placeholders.
    ///
    /// - missing key with arguments → `<key, [arg0], [arg1]>`
    /// - empty template → `""`
    /// - no arguments → the template unchanged
    /// - malformed template → the template unchanged
    #[must_use]
    pub fn get_with_args(&self, key: &str, args: &[FormatArg]) -> String {
        if key.is_empty() {
            return String::new();
        }
        let Some(template) = self.lookup(key) else {
            return if args.is_empty() {
                missing_marker(key)
            } else {
                missing_marker_with_args(key, args)
            };
        };
        if template.is_empty() || args.is_empty() {
            return template.to_string();
        }

        format_template(template, args).unwrap_or_else(|error| {
            tracing::warn!(key = %key, %error, "Failed to format translation");
            template.to_string()
        })
    }

    /// Raw translation for `key`, without any fallback.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(String::as_str)
    }

    /// True if the active table has an entry for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Key of the active language.
    #[must_use]
    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    /// Whether any language has been loaded.
    #[must_use]
    pub const fn state(&self) -> ResolverState {
        self.state
    }

    /// Number of entries in the active table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True if the active table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Registers a callback run after every successful load.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Self) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Registers a channel that receives one event per successful load.
    pub fn subscribe_channel(
        &mut self,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<LanguageChanged>) {
        self.subscribers.subscribe_channel()
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{
        AtomicUsize,
        Ordering,
    };
    use std::sync::{
        Arc,
        Mutex,
    };

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::resource::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_language("test", "name=Test\nhello=World\n# comment\nfoo=bar")
            .with_language(
                "en_US",
                "name=English\ngreet=Hello {0}\nscore={0} scored {1:N0} points\nbroken=Hi {0\nblank=\nonly_en=English only",
            )
            .with_language("ja_JP", "name=日本語\ngreet=こんにちは {0}\n=novalue")
            .with_language("empty", "")
            .with_language("bom", "\u{feff}")
    }

    fn loaded(key: &str) -> Resolver {
        let mut resolver = Resolver::default();
        let outcome = resolver.load_language(&store(), key).unwrap();
        assert!(outcome.is_loaded(), "{key} should load, got {outcome:?}");
        resolver
    }

    fn counting(resolver: &mut Resolver) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        resolver.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        count
    }

    #[googletest::test]
    fn new_resolver_is_uninitialized() {
        let resolver = Resolver::default();

        expect_that!(resolver.state(), eq(ResolverState::Uninitialized));
        expect_that!(resolver.current_language(), eq("en_US"));
        expect_that!(resolver.is_empty(), eq(true));
        expect_that!(resolver.get("hello"), eq("<hello>"));
    }

    #[googletest::test]
    fn load_round_trip() {
        let resolver = loaded("test");

        expect_that!(resolver.get("hello"), eq("World"));
        expect_that!(resolver.get("foo"), eq("bar"));
        expect_that!(resolver.get("name"), eq("<name>"));
        expect_that!(resolver.current_language(), eq("test"));
        expect_that!(resolver.state(), eq(ResolverState::Loaded));
        expect_that!(resolver.len(), eq(2));
    }

    #[googletest::test]
    fn load_reports_entry_count() {
        let mut resolver = Resolver::default();

        let outcome = resolver.load_language(&store(), "ja_JP").unwrap();

        expect_that!(outcome, eq(LoadOutcome::Loaded { entries: 1 }));
        expect_that!(resolver.contains(""), eq(false));
    }

    #[rstest]
    #[case::unknown_key("klingon", LoadOutcome::KeyNotFound)]
    #[case::empty_key("", LoadOutcome::KeyNotFound)]
    #[case::empty_content("empty", LoadOutcome::ContentEmpty)]
    #[case::bom_only("bom", LoadOutcome::ContentEmpty)]
    fn failed_load_changes_nothing(#[case] key: &str, #[case] expected: LoadOutcome) {
        let mut resolver = loaded("test");
        let notifications = counting(&mut resolver);

        let outcome = resolver.load_language(&store(), key).unwrap();

        assert_eq!(outcome, expected);
        assert_eq!(resolver.current_language(), "test");
        assert_eq!(resolver.get("hello"), "World");
        assert_eq!(resolver.len(), 2);
        assert_eq!(notifications.load(Ordering::SeqCst), 0);
    }

    #[googletest::test]
    fn failed_first_load_stays_uninitialized() {
        let mut resolver = Resolver::default();

        let outcome = resolver.load_language(&store(), "klingon").unwrap();

        expect_that!(outcome, eq(LoadOutcome::KeyNotFound));
        expect_that!(resolver.state(), eq(ResolverState::Uninitialized));
    }

    #[googletest::test]
    fn second_load_replaces_first() {
        let mut resolver = loaded("en_US");
        expect_that!(resolver.get("only_en"), eq("English only"));

        resolver.load_language(&store(), "ja_JP").unwrap();

        expect_that!(resolver.get("only_en"), eq("<only_en>"));
        expect_that!(resolver.get_with_args("greet", &["世界".into()]), eq("こんにちは 世界"));
        expect_that!(resolver.current_language(), eq("ja_JP"));
    }

    #[googletest::test]
    fn notifies_once_per_successful_load() {
        let mut resolver = Resolver::default();
        let notifications = counting(&mut resolver);

        resolver.load_language(&store(), "en_US").unwrap();
        resolver.load_language(&store(), "missing").unwrap();
        resolver.load_language(&store(), "ja_JP").unwrap();
        resolver.load_language(&store(), "ja_JP").unwrap();

        expect_that!(notifications.load(Ordering::SeqCst), eq(3));
    }

    #[googletest::test]
    fn subscriber_sees_new_language() {
        let mut resolver = Resolver::default();
        let (_, mut receiver) = resolver.subscribe_channel();

        resolver.load_language(&store(), "test").unwrap();

        expect_that!(receiver.try_recv().ok(), some(eq(LanguageChanged)));
        expect_that!(receiver.try_recv().is_err(), eq(true));
    }

    #[googletest::test]
    fn callback_reads_new_language_during_dispatch() {
        let mut resolver = loaded("test");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        resolver.subscribe(move |resolver| {
            sink.lock().unwrap().push((resolver.current_language().to_string(), resolver.get("greet")));
            Ok(())
        });

        resolver.load_language(&store(), "en_US").unwrap();
        resolver.load_language(&store(), "ja_JP").unwrap();

        let calls = seen.lock().unwrap().clone();
        expect_that!(
            calls,
            elements_are![
                eq(&("en_US".to_string(), "Hello {0}".to_string())),
                eq(&("ja_JP".to_string(), "こんにちは {0}".to_string())),
            ]
        );
    }

    #[googletest::test]
    fn subscribers_survive_dispatch() {
        let mut resolver = Resolver::default();
        let notifications = counting(&mut resolver);
        let second = resolver.subscribe(|_| Ok(()));

        resolver.load_language(&store(), "test").unwrap();
        resolver.load_language(&store(), "en_US").unwrap();

        expect_that!(notifications.load(Ordering::SeqCst), eq(2));
        expect_that!(resolver.unsubscribe(second), eq(true));
    }

    #[googletest::test]
    fn subscriber_error_propagates_after_table_swap() {
        let mut resolver = Resolver::default();
        resolver.subscribe(|_| Err("listener failed".into()));

        let result = resolver.load_language(&store(), "test");

        expect_that!(result.is_err(), eq(true));
        expect_that!(resolver.current_language(), eq("test"));
        expect_that!(resolver.get("hello"), eq("World"));
    }

    #[googletest::test]
    fn unsubscribed_callback_is_not_called() {
        let mut resolver = Resolver::default();
        let id = resolver.subscribe(|_| Err("should not run".into()));

        expect_that!(resolver.unsubscribe(id), eq(true));
        expect_that!(resolver.load_language(&store(), "test").is_ok(), eq(true));
    }

    #[rstest]
    #[case::hit("hello", "World")]
    #[case::miss("missing_key", "<missing_key>")]
    #[case::empty_key("", "")]
    fn test_get(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(loaded("test").get(key), expected);
    }

    #[rstest]
    #[case::substitution("greet", vec!["World".into()], "Hello World")]
    #[case::grouping("score", vec!["Ann".into(), 12345.into()], "Ann scored 12,345 points")]
    #[case::missing_with_args("missing_key", vec![1.into(), 2.into()], "<missing_key, [1], [2]>")]
    #[case::missing_without_args("missing_key", vec![], "<missing_key>")]
    #[case::no_args_verbatim("greet", vec![], "Hello {0}")]
    #[case::empty_template("blank", vec!["x".into()], "")]
    #[case::malformed_template("broken", vec!["Bob".into()], "Hi {0")]
    #[case::too_few_args("score", vec!["Ann".into()], "{0} scored {1:N0} points")]
    #[case::extra_args_ignored("greet", vec!["World".into(), 5.into()], "Hello World")]
    #[case::empty_key("", vec![1.into()], "")]
    fn test_get_with_args(
        #[case] key: &str,
        #[case] args: Vec<FormatArg>,
        #[case] expected: &str,
    ) {
        assert_eq!(loaded("en_US").get_with_args(key, &args), expected);
    }
}
