// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// DialogHub - per-page dialog dispatcher
//
// Drivers push every native dialog of one page into the hub. The hub hands
// it to the oldest registered one-shot listener and returns dialogs nobody
// claimed, so the driver can dismiss them instead of leaving the page
// blocked.

use crate::protocol::event_source::{DialogListener, EventSource, Subscription, next_subscription_id};
use crate::protocol::DialogEvent;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Storage for a single pending listener
struct ListenerEntry {
    id: u64,
    listener: DialogListener,
}

/// Dialog dispatcher for one page context.
///
/// Cloning shares the listener table.
///
/// # Example
///
/// ```ignore
/// use dialog_arbiter::{DialogHub, DialogInterceptor};
///
/// let hub = DialogHub::new();
/// let interceptor = DialogInterceptor::new(hub.clone());
///
/// // Driver side: forward each native dialog
/// if let Some(unclaimed) = hub.dispatch(event) {
///     unclaimed.handle().dismiss().await?;
/// }
/// ```
#[derive(Clone, Default)]
pub struct DialogHub {
    listeners: Arc<Mutex<VecDeque<ListenerEntry>>>,
}

impl DialogHub {
    /// Creates a hub with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers `event` to the registered listeners, oldest first.
    ///
    /// Each listener is removed before it is invoked. Returns the event if no
    /// listener claimed it.
    pub fn dispatch(&self, event: DialogEvent) -> Option<DialogEvent> {
        let mut event = event;
        loop {
            // Pop under the lock, invoke outside it
            let entry = self.listeners.lock().pop_front();
            let Some(entry) = entry else {
                tracing::debug!(
                    kind = %event.kind(),
                    "No listener registered for dialog"
                );
                return Some(event);
            };

            match (entry.listener)(event) {
                None => {
                    tracing::debug!(subscription_id = entry.id, "Dialog claimed by listener");
                    return None;
                }
                Some(returned) => {
                    tracing::debug!(
                        subscription_id = entry.id,
                        "Listener declined dialog, offering to next"
                    );
                    event = returned;
                }
            }
        }
    }
}

impl EventSource for DialogHub {
    fn on_next(&self, listener: DialogListener) -> Subscription {
        let id = next_subscription_id();
        self.listeners.lock().push_back(ListenerEntry { id, listener });

        let weak = Arc::downgrade(&self.listeners);
        Subscription::new(id, move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.lock().retain(|entry| entry.id != id);
            }
        })
    }

    fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl std::fmt::Debug for DialogHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
