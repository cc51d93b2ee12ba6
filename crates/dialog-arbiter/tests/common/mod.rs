// Shared helpers for integration tests
//
// - init_tracing(): opt-in logs via RUST_LOG
// - RecordingHandle: a DialogHandle that records every accept/dismiss call
// - StickySource: an EventSource that ignores unsubscribe, for exercising
//   late listener invocations

#![allow(dead_code)]

use async_trait::async_trait;
use dialog_arbiter::{
    DialogEvent, DialogHandle, DialogKind, DialogListener, Error, EventSource, Result,
    Subscription, protocol::next_subscription_id,
};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleCall {
    Accept(Option<String>),
    Dismiss,
}

/// Records calls made on the dialog handle.
#[derive(Clone, Default)]
pub struct RecordingHandle {
    calls: Arc<Mutex<Vec<HandleCall>>>,
    fail: bool,
}

impl RecordingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle whose accept and dismiss always fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<HandleCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn event(&self, kind: DialogKind, message: &str) -> DialogEvent {
        DialogEvent::new(kind, message, Arc::new(self.clone()))
    }

    fn record(&self, call: HandleCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(Error::DialogHandle("dialog already closed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DialogHandle for RecordingHandle {
    async fn accept(&self, prompt_text: Option<&str>) -> Result<()> {
        self.record(HandleCall::Accept(prompt_text.map(str::to_string)))
    }

    async fn dismiss(&self) -> Result<()> {
        self.record(HandleCall::Dismiss)
    }
}

/// Keeps every listener it was given, even after unsubscribe.
#[derive(Clone, Default)]
pub struct StickySource {
    listeners: Arc<Mutex<Vec<DialogListener>>>,
}

impl StickySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes the oldest retained listener, returning what it handed back.
    pub fn fire(&self, event: DialogEvent) -> Option<DialogEvent> {
        let listener = {
            let mut listeners = self.listeners.lock().unwrap();
            if listeners.is_empty() {
                return Some(event);
            }
            listeners.remove(0)
        };
        listener(event)
    }
}

impl EventSource for StickySource {
    fn on_next(&self, listener: DialogListener) -> Subscription {
        self.listeners.lock().unwrap().push(listener);
        Subscription::new(next_subscription_id(), || {})
    }

    fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

/// Drops every listener immediately without invoking it.
#[derive(Clone, Default)]
pub struct ClosedSource;

impl EventSource for ClosedSource {
    fn on_next(&self, listener: DialogListener) -> Subscription {
        drop(listener);
        Subscription::new(next_subscription_id(), || {})
    }

    fn listener_count(&self) -> usize {
        0
    }
}
