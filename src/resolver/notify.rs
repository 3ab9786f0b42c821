//! Language-change notification.
//!
//! Subscribers run synchronously, in subscription order, on the thread that
//! performed the load. Callbacks receive the resolver with the new language
//! already in place, so they can re-query it directly.

use std::fmt;

use thiserror::Error;
use tokio::sync::mpsc;

use super::Resolver;

/// Error a subscriber may return; it is propagated to the caller of the load.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registered callback.
type Callback = Box<dyn FnMut(&Resolver) -> Result<(), SubscriberError> + Send>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Error, Debug)]
#[error("Language change subscriber {subscription} failed: {source}")]
pub struct NotifyError {
    pub subscription: SubscriptionId,
    #[source]
    pub source: SubscriberError,
}

/// Event delivered by channel subscribers. Carries no payload; receivers
/// re-query the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageChanged;

/// Ordered list of language-change subscribers.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("next_id", &self.next_id)
            .field("callbacks", &self.callbacks.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}

impl Subscribers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback. Callbacks run in registration order.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Resolver) -> Result<(), SubscriberError> + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Registers a subscriber that forwards every notification into a channel.
    ///
    /// A dropped receiver turns the subscriber into a no-op.
    pub fn subscribe_channel(
        &mut self,
    ) -> (SubscriptionId, mpsc::UnboundedReceiver<LanguageChanged>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.subscribe(move |_| {
            if sender.send(LanguageChanged).is_err() {
                tracing::debug!("Language change receiver dropped");
            }
            Ok(())
        });
        (id, receiver)
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Invokes every subscriber in order with `resolver`, stopping at the first failure.
    pub fn notify(&mut self, resolver: &Resolver) -> Result<(), NotifyError> {
        for (id, callback) in &mut self.callbacks {
            callback(resolver).map_err(|source| NotifyError { subscription: *id, source })?;
        }
        Ok(())
    }
}
