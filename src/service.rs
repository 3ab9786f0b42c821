//! Localization service: owns the store, catalog and resolver.
//!
//! Startup order is explicit. Construct with [`Localization::new`], then call
//! [`Localization::init`] once to refresh the catalog and load the initial
//! language.

use tokio::sync::mpsc;

use crate::catalog::Catalog;
use crate::config::LocalizationSettings;
use crate::preference::PreferenceFile;
use crate::resolver::{
    FormatArg,
    LanguageChanged,
    LoadOutcome,
    NotifyError,
    Resolver,
    ResolverState,
    SubscriberError,
    SubscriptionId,
};
use crate::resource::ResourceStore;

/// Runtime localization for one application.
#[derive(Debug)]
pub struct Localization<S> {
    store: S,
    catalog: Catalog,
    resolver: Resolver,
    /// Language loaded by `init` when nothing is remembered.
    default_language: String,
    preference: Option<PreferenceFile>,
}

impl<S: ResourceStore> Localization<S> {
    /// Creates an uninitialized service. Nothing is scanned or loaded yet.
    #[must_use]
    pub fn new(store: S, settings: &LocalizationSettings) -> Self {
        Self {
            store,
            catalog: Catalog::new(settings.fallback_language.clone()),
            resolver: Resolver::new(settings.default_language.clone()),
            default_language: settings.default_language.clone(),
            preference: None,
        }
    }

    /// Remembers explicit language switches in `preference`.
    #[must_use]
    pub fn with_preference(mut self, preference: PreferenceFile) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Refreshes the catalog, then loads the remembered language if it is
    /// still available, otherwise the default language.
    pub fn init(&mut self) -> Result<LoadOutcome, NotifyError> {
        self.refresh_available_languages();

        let initial = self
            .remembered_language()
            .filter(|key| {
                let available = self.catalog.contains_key(key);
                if !available {
                    tracing::warn!(language = %key, "Remembered language is no longer available");
                }
                available
            })
            .unwrap_or_else(|| self.default_language.clone());

        tracing::debug!(language = %initial, "Loading initial language");
        self.resolver.load_language(&self.store, &initial)
    }

    /// Hands the store back, ending the service.
    #[must_use]
    pub fn shutdown(self) -> S {
        tracing::debug!(language = %self.resolver.current_language(), "Localization shut down");
        self.store
    }

    /// Rebuilds the catalog from the store.
    pub fn refresh_available_languages(&mut self) {
        self.catalog.refresh_available_languages(&self.store);
    }

    #[must_use]
    pub fn available_language_names(&self) -> Vec<String> {
        self.catalog.available_language_names()
    }

    #[must_use]
    pub fn language_key_from_name(&self, name: &str) -> String {
        self.catalog.language_key_from_name(name)
    }

    /// Switches to the language `key` and remembers it on success.
    pub fn load_language(&mut self, key: &str) -> Result<LoadOutcome, NotifyError> {
        let outcome = self.resolver.load_language(&self.store, key);
        if matches!(outcome, Ok(LoadOutcome::Loaded { .. }) | Err(_)) {
            self.remember(key);
        }
        outcome
    }

    /// Switches to the language whose display name is `name`.
    ///
    /// Unknown names resolve to the fallback key, as
    /// [`Catalog::language_key_from_name`] does.
    pub fn set_language_by_name(&mut self, name: &str) -> Result<LoadOutcome, NotifyError> {
        let key = self.catalog.language_key_from_name(name);
        self.load_language(&key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.resolver.get(key)
    }

    #[must_use]
    pub fn get_with_args(&self, key: &str, args: &[FormatArg]) -> String {
        self.resolver.get_with_args(key, args)
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        self.resolver.current_language()
    }

    /// Display name of the active language, if the catalog knows it.
    #[must_use]
    pub fn current_language_name(&self) -> Option<&str> {
        self.catalog.display_name(self.resolver.current_language())
    }

    #[must_use]
    pub const fn state(&self) -> ResolverState {
        self.resolver.state()
    }

    /// Registers a callback run after every successful load. It receives the
    /// resolver with the new language already active.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Resolver) -> Result<(), SubscriberError> + Send + 'static,
    {
        self.resolver.subscribe(callback)
    }

    /// Registers a channel receiving one event per successful load.
    pub fn subscribe_channel(
        &mut self,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<LanguageChanged>) {
        self.resolver.subscribe_channel()
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.resolver.unsubscribe(id)
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store. Call
    /// [`refresh_available_languages`](Self::refresh_available_languages)
    /// afterwards to pick up changes.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Reads the remembered key. Failures are logged and ignored.
    fn remembered_language(&self) -> Option<String> {
        let preference = self.preference.as_ref()?;
        match preference.load() {
            Ok(language) => language,
            Err(error) => {
                tracing::warn!("Ignoring language preference {:?}: {}", preference.path(), error);
                None
            }
        }
    }

    /// Persists `key` as the remembered language. Failures are logged and ignored.
    fn remember(&self, key: &str) {
        if let Some(preference) = &self.preference
            && let Err(error) = preference.save(key)
        {
            tracing::warn!("Failed to save language preference {:?}: {}", preference.path(), error);
        }
    }
}
