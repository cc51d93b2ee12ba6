// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// EventArbiter - one-shot race between a dialog event and a timer
//
// Architecture:
// - begin() claims the page's active-arbitration marker and subscribes a
//   one-shot listener synchronously, before any trigger can run
// - The timer starts at begin(); settle() races the listener against it
// - A shared resolution flag decides the winner; the loser is a no-op
// - The subscription and the marker are RAII guards, released on every
//   path including a dropped future

use crate::error::{Error, Result};
use crate::policy::{DialogAction, EventResponder, ResponseAction};
use crate::protocol::{DialogEvent, EventSource, Subscription};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// Default time to wait for a dialog (10 seconds)
pub const DEFAULT_DIALOG_TIMEOUT: Duration = Duration::from_millis(crate::DEFAULT_DIALOG_TIMEOUT_MS);

// Stand-in deadline for budgets past the clock's range, about 30 years
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// What to wait for and what to do with it.
pub struct ArbitrationRequest {
    timeout: Duration,
    on_event: EventResponder,
}

impl ArbitrationRequest {
    /// Creates a request with a custom response function.
    pub fn new<F>(timeout: Duration, on_event: F) -> Self
    where
        F: FnOnce(&DialogEvent) -> Result<Option<ResponseAction>> + Send + 'static,
    {
        Self {
            timeout,
            on_event: Box::new(on_event),
        }
    }

    /// Creates a request whose response is chosen by `action`.
    pub fn for_action(action: DialogAction, timeout: Duration) -> Self {
        Self {
            timeout,
            on_event: action.into_responder(),
        }
    }

    /// Returns the timeout budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for ArbitrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArbitrationRequest")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Outcome of one arbitration. Exactly one is produced per request.
#[derive(Debug)]
pub enum ArbitrationResult {
    /// The event fired first and its response was applied
    Resolved(DialogEvent),
    /// The timer fired first
    TimedOut,
}

impl ArbitrationResult {
    /// Returns true if a dialog was captured.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ArbitrationResult::Resolved(_))
    }

    /// Returns the captured event, if any.
    pub fn event(&self) -> Option<&DialogEvent> {
        match self {
            ArbitrationResult::Resolved(event) => Some(event),
            ArbitrationResult::TimedOut => None,
        }
    }

    /// Consumes the result, returning the captured event, if any.
    pub fn into_event(self) -> Option<DialogEvent> {
        match self {
            ArbitrationResult::Resolved(event) => Some(event),
            ArbitrationResult::TimedOut => None,
        }
    }
}

/// Races one dialog event against a timer for a single page context.
///
/// Cloning shares the event source and the active-arbitration marker, so
/// clones still allow only one arbitration at a time.
#[derive(Clone)]
pub struct EventArbiter {
    source: Arc<dyn EventSource>,
    active: Arc<AtomicBool>,
}

impl EventArbiter {
    /// Creates an arbiter over `source`.
    pub fn new(source: impl EventSource + 'static) -> Self {
        Self::from_source(Arc::new(source))
    }

    /// Creates an arbiter over a shared source.
    pub fn from_source(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the event source.
    pub fn source(&self) -> &Arc<dyn EventSource> {
        &self.source
    }

    /// Returns true while an arbitration holds this page context.
    pub fn is_arbitrating(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Subscribes to the next event and returns the pending race.
    ///
    /// The listener is registered before this returns, so a trigger started
    /// afterwards (or concurrently with [`PendingArbitration::settle`]) can
    /// not be missed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyArbitrating`] if another arbitration is active
    /// on this page context. The active one is not affected.
    pub fn begin(&self, request: ArbitrationRequest) -> Result<PendingArbitration> {
        let active = ActiveGuard::acquire(&self.active)?;

        let resolved = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel();

        let listener_resolved = Arc::clone(&resolved);
        let subscription = self.source.on_next(Box::new(move |event: DialogEvent| {
            if listener_resolved.swap(true, Ordering::AcqRel) {
                tracing::debug!(kind = %event.kind(), "Dialog arrived after arbitration resolved");
                return Some(event);
            }
            // Receiver gone means the arbitration was dropped mid-flight
            tx.send(event).err()
        }));

        tracing::debug!(
            subscription_id = subscription.id(),
            timeout_ms = request.timeout.as_millis() as u64,
            "Dialog arbitration started"
        );

        Ok(PendingArbitration {
            timeout: request.timeout,
            deadline: deadline_after(request.timeout),
            on_event: request.on_event,
            resolved,
            receiver: rx,
            subscription,
            _active: active,
        })
    }

    /// Waits for the next event or the timeout, whichever comes first.
    ///
    /// Equivalent to `begin(request)?.settle().await`. Use [`begin`](Self::begin)
    /// when the trigger must run on the same task.
    pub async fn arbitrate(&self, request: ArbitrationRequest) -> Result<ArbitrationResult> {
        self.begin(request)?.settle().await
    }

    /// Checks that no listener outlived its arbitration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListenerLeak`] if the source still reports listeners
    /// while no arbitration is active.
    pub fn ensure_released(&self) -> Result<()> {
        if self.is_arbitrating() {
            return Ok(());
        }
        match self.source.listener_count() {
            0 => Ok(()),
            remaining => Err(Error::ListenerLeak { remaining }),
        }
    }
}

impl std::fmt::Debug for EventArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventArbiter")
            .field("active", &self.is_arbitrating())
            .field("listeners", &self.source.listener_count())
            .finish()
    }
}

/// A subscribed arbitration waiting to be settled.
///
/// Dropping it without settling unsubscribes and frees the page context.
pub struct PendingArbitration {
    timeout: Duration,
    deadline: Instant,
    on_event: EventResponder,
    resolved: Arc<AtomicBool>,
    receiver: oneshot::Receiver<DialogEvent>,
    // Dropped before the marker
    subscription: Subscription,
    _active: ActiveGuard,
}

impl PendingArbitration {
    /// Races the subscribed listener against the deadline set by `begin`.
    ///
    /// The listener is unsubscribed before this returns, whatever the
    /// outcome. The response action runs at most once, and only when the
    /// event won.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedDialogKind`] if the response rejects the event;
    ///   the dialog handle is not touched
    /// - [`Error::SourceClosed`] if the source dropped the listener unused
    /// - errors from the dialog handle
    pub async fn settle(self) -> Result<ArbitrationResult> {
        let PendingArbitration {
            timeout,
            deadline,
            on_event,
            resolved,
            mut receiver,
            subscription,
            _active,
        } = self;

        let raced = tokio::time::timeout_at(deadline, &mut receiver).await;
        let outcome = match raced {
            Ok(Ok(event)) => Ok(Some(event)),
            Ok(Err(_)) => Err(Error::SourceClosed),
            Err(_elapsed) => {
                if resolved.swap(true, Ordering::AcqRel) {
                    // Listener claimed the flag on another thread but has not sent yet.
                    // Only reachable on a multi-thread runtime, so tests can only
                    // stress it, not force it.
                    receiver.await.map(Some).map_err(|_| Error::SourceClosed)
                } else {
                    Ok(None)
                }
            }
        };

        subscription.unsubscribe();

        let Some(event) = outcome? else {
            tracing::debug!(
                timeout_ms = timeout.as_millis() as u64,
                "Dialog arbitration timed out"
            );
            return Ok(ArbitrationResult::TimedOut);
        };

        tracing::debug!(
            kind = %event.kind(),
            dialog_message = event.message(),
            "Dialog arbitration resolved"
        );

        match on_event(&event) {
            Ok(Some(action)) => action.apply(event.handle().as_ref()).await?,
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(kind = %event.kind(), "Dialog left open: {}", e);
                return Err(e);
            }
        }

        Ok(ArbitrationResult::Resolved(event))
    }

    /// Returns the timeout budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the instant at which the timer fires.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

impl std::fmt::Debug for PendingArbitration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingArbitration")
            .field("timeout", &self.timeout)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or(now + FAR_FUTURE)
}

/// Holds the active-arbitration marker of one page context.
struct ActiveGuard {
    active: Arc<AtomicBool>,
}

impl ActiveGuard {
    fn acquire(active: &Arc<AtomicBool>) -> Result<Self> {
        if active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Rejected overlapping dialog arbitration");
            return Err(Error::AlreadyArbitrating);
        }
        Ok(Self {
            active: Arc::clone(active),
        })
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
