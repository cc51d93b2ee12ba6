// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// DialogInterceptor - the operations test code calls
//
// Each operation is one arbitration with a policy-selected response. The
// arbiter's active marker makes calls on the same page strictly sequential.

use crate::api::ArbiterOptions;
use crate::arbiter::{ArbitrationRequest, ArbitrationResult, EventArbiter};
use crate::error::{Error, Result};
use crate::policy::DialogAction;
use crate::protocol::{DialogEvent, EventSource};
use std::future::Future;
use std::time::Duration;

/// Message of a captured dialog, or the timeout sentinel.
///
/// A timed-out wait is data, so tests can assert that no dialog appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogText {
    /// A dialog appeared with this message
    Captured(String),
    /// No dialog appeared within the timeout
    TimedOut,
}

impl DialogText {
    /// Returns true if a dialog was captured.
    pub fn is_captured(&self) -> bool {
        matches!(self, DialogText::Captured(_))
    }

    /// Returns true if the wait timed out.
    pub fn is_timed_out(&self) -> bool {
        matches!(self, DialogText::TimedOut)
    }

    /// Returns the captured message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DialogText::Captured(message) => Some(message),
            DialogText::TimedOut => None,
        }
    }

    /// Consumes self, returning the captured message, if any.
    pub fn into_message(self) -> Option<String> {
        match self {
            DialogText::Captured(message) => Some(message),
            DialogText::TimedOut => None,
        }
    }
}

impl From<ArbitrationResult> for DialogText {
    fn from(result: ArbitrationResult) -> Self {
        match result.into_event() {
            Some(event) => DialogText::Captured(event.into_message()),
            None => DialogText::TimedOut,
        }
    }
}

/// Intercepts native dialogs on one page context.
///
/// The listener must be in place before the action that raises the dialog.
/// Either spawn the operation and let it subscribe first, or use
/// [`execute_with_dialog`](Self::execute_with_dialog), which sequences the
/// action for you. Cloning shares the page context: clones can not
/// arbitrate concurrently.
///
/// # Example
///
/// ```ignore
/// use dialog_arbiter::DialogInterceptor;
///
/// let interceptor = DialogInterceptor::for_page(&page).await?;
/// let button = page.locator("button:has-text('Click for JS Confirm')").await;
///
/// let text = interceptor
///     .execute_with_dialog(button.click(None), true, None)
///     .await?;
/// assert_eq!(text.message(), Some("I am a JS Confirm"));
///
/// // No dialog expected: a timeout is data, not an error
/// let nothing = interceptor.wait_and_read(Some(Duration::from_secs(1))).await?;
/// assert!(nothing.is_timed_out());
/// ```
#[derive(Clone, Debug)]
pub struct DialogInterceptor {
    arbiter: EventArbiter,
    options: ArbiterOptions,
}

impl DialogInterceptor {
    /// Creates an interceptor with default options.
    pub fn new(source: impl EventSource + 'static) -> Self {
        Self::with_options(source, ArbiterOptions::default())
    }

    /// Creates an interceptor with custom options.
    pub fn with_options(source: impl EventSource + 'static, options: ArbiterOptions) -> Self {
        Self {
            arbiter: EventArbiter::new(source),
            options,
        }
    }

    /// Creates an interceptor over an existing arbiter.
    pub fn from_arbiter(arbiter: EventArbiter, options: ArbiterOptions) -> Self {
        Self { arbiter, options }
    }

    /// Returns the underlying arbiter.
    pub fn arbiter(&self) -> &EventArbiter {
        &self.arbiter
    }

    /// Returns the options.
    pub fn options(&self) -> &ArbiterOptions {
        &self.options
    }

    fn request(&self, action: DialogAction, timeout: Option<Duration>) -> ArbitrationRequest {
        let timeout = timeout.unwrap_or_else(|| self.options.timeout_duration());
        ArbitrationRequest::for_action(action, timeout)
    }

    async fn run(&self, action: DialogAction, timeout: Option<Duration>) -> Result<ArbitrationResult> {
        self.arbiter.arbitrate(self.request(action, timeout)).await
    }

    /// Waits for the next dialog and returns its message.
    ///
    /// The dialog is left open. When the page must proceed, use
    /// [`wait_for_dialog`](Self::wait_for_dialog) and close the returned
    /// event's handle, or one of the accepting/dismissing operations.
    pub async fn wait_and_read(&self, timeout: Option<Duration>) -> Result<DialogText> {
        self.run(DialogAction::Observe, timeout).await.map(DialogText::from)
    }

    /// Waits for the next dialog and returns it untouched.
    ///
    /// Returns `None` on timeout. The caller owns closing the dialog through
    /// [`DialogEvent::handle`].
    pub async fn wait_for_dialog(&self, timeout: Option<Duration>) -> Result<Option<DialogEvent>> {
        Ok(self.run(DialogAction::Observe, timeout).await?.into_event())
    }

    /// Accepts the next dialog. Returns whether one appeared in time.
    pub async fn accept(&self, timeout: Option<Duration>) -> Result<bool> {
        Ok(self.run(DialogAction::Accept, timeout).await?.is_resolved())
    }

    /// Dismisses the next dialog. Returns whether one appeared in time.
    pub async fn dismiss(&self, timeout: Option<Duration>) -> Result<bool> {
        Ok(self.run(DialogAction::Dismiss, timeout).await?.is_resolved())
    }

    /// Enters `text` into the next prompt and accepts it.
    ///
    /// Returns whether a dialog appeared in time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialogKind`] if the dialog is not a
    /// prompt. That dialog is left open.
    pub async fn accept_with_text(&self, text: &str, timeout: Option<Duration>) -> Result<bool> {
        let action = DialogAction::AcceptWithText(text.to_string());
        Ok(self.run(action, timeout).await?.is_resolved())
    }

    /// Accepts or dismisses the next dialog and returns its message.
    pub async fn handle(&self, accept: bool, timeout: Option<Duration>) -> Result<DialogText> {
        self.run(DialogAction::accept_or_dismiss(accept), timeout)
            .await
            .map(DialogText::from)
    }

    /// Accepts the next dialog and returns its message.
    pub async fn wait_and_accept(&self, timeout: Option<Duration>) -> Result<DialogText> {
        self.handle(true, timeout).await
    }

    /// Dismisses the next dialog and returns its message.
    pub async fn wait_and_dismiss(&self, timeout: Option<Duration>) -> Result<DialogText> {
        self.handle(false, timeout).await
    }

    /// Probes briefly for a dialog, dismissing it if one shows up.
    ///
    /// The window is [`ArbiterOptions::presence_probe`] (100ms by default).
    /// A dialog that appears later is not seen.
    pub async fn is_dialog_present(&self) -> Result<bool> {
        let probe = self.options.presence_probe_duration();
        self.dismiss(Some(probe)).await
    }

    /// Runs `trigger` with the listener already in place, then accepts or
    /// dismisses the dialog it raised.
    ///
    /// The arbitration subscribes before `trigger` is first polled and both
    /// run concurrently on the current task, so a trigger that blocks until
    /// the dialog closes does not deadlock.
    ///
    /// # Errors
    ///
    /// If `trigger` fails, the arbitration is abandoned (its listener is
    /// released) and [`Error::TriggerFailed`] is returned.
    pub async fn execute_with_dialog<F, E>(
        &self,
        trigger: F,
        accept: bool,
        timeout: Option<Duration>,
    ) -> Result<DialogText>
    where
        F: Future<Output = std::result::Result<(), E>>,
        E: std::fmt::Display,
    {
        let pending = self
            .arbiter
            .begin(self.request(DialogAction::accept_or_dismiss(accept), timeout))?;

        let trigger = async move {
            trigger
                .await
                .map_err(|e| Error::TriggerFailed(e.to_string()))
        };

        let (result, ()) = futures_util::future::try_join(pending.settle(), trigger).await?;
        Ok(DialogText::from(result))
    }
}
