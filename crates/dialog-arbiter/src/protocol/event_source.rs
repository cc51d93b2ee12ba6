// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Event source seam
//
// The arbiter subscribes a one-shot listener to an EventSource and drops the
// returned Subscription to unsubscribe. Drivers implement EventSource, or
// feed their dialog events into a DialogHub which implements it for them.

use crate::protocol::DialogEvent;
use std::sync::atomic::{AtomicU64, Ordering};

/// A one-shot dialog listener.
///
/// Returns `None` when it claimed the event, or hands the event back when it
/// did not (for example because its arbitration already resolved), so the
/// source can offer it elsewhere or apply a default disposition.
pub type DialogListener = Box<dyn FnOnce(DialogEvent) -> Option<DialogEvent> + Send>;

/// Something the arbiter can subscribe a one-shot dialog listener to.
pub trait EventSource: Send + Sync {
    /// Registers `listener` for the next dialog event.
    ///
    /// The listener is invoked at most once. Once the returned subscription
    /// is dropped, the listener must never be invoked.
    fn on_next(&self, listener: DialogListener) -> Subscription;

    /// Number of listeners currently registered.
    fn listener_count(&self) -> usize;
}

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-unique subscription id.
pub fn next_subscription_id() -> u64 {
    NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed)
}

/// A subscription handle that unregisters its listener when dropped.
///
/// Sources build one with the closure that removes their listener entry.
/// Dropping the handle after the source itself is gone must be harmless, so
/// sources should capture a weak reference to their listener table.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a subscription that runs `release` exactly once on drop.
    pub fn new(id: u64, release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// Returns the subscription id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Explicitly unsubscribes the listener.
    ///
    /// Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_release_runs_once_on_unsubscribe() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let subscription = Subscription::new(next_subscription_id(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        subscription.unsubscribe();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let a = next_subscription_id();
        let b = next_subscription_id();
        assert_ne!(a, b);
    }
}
