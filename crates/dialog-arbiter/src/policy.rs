// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog action policy
//
// Maps the interaction a caller asked for (observe, accept, dismiss, or
// accept with text) to the response applied to the captured dialog.

use crate::error::{Error, Result};
use crate::protocol::{DialogEvent, DialogHandle};

/// Response function handed to the arbiter.
///
/// Runs once on the captured event. `Ok(None)` leaves the dialog untouched.
pub type EventResponder = Box<dyn FnOnce(&DialogEvent) -> Result<Option<ResponseAction>> + Send>;

/// The interaction a caller requests for the next dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// Read the message only; the dialog stays open.
    ///
    /// A page blocked by the dialog needs a follow-up accept or dismiss.
    Observe,
    /// Click OK, ignoring any prompt default.
    Accept,
    /// Click Cancel (or close an alert).
    Dismiss,
    /// Enter text into a prompt and click OK. Prompt dialogs only.
    AcceptWithText(String),
}

impl DialogAction {
    /// Accept when `accept` is true, dismiss otherwise.
    pub fn accept_or_dismiss(accept: bool) -> Self {
        if accept {
            DialogAction::Accept
        } else {
            DialogAction::Dismiss
        }
    }

    /// Decides the response for a captured event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialogKind`] when text is requested for a
    /// dialog that is not a prompt.
    pub fn respond_to(self, event: &DialogEvent) -> Result<Option<ResponseAction>> {
        match self {
            DialogAction::Observe => Ok(None),
            DialogAction::Accept => Ok(Some(ResponseAction::Accept(None))),
            DialogAction::Dismiss => Ok(Some(ResponseAction::Dismiss)),
            DialogAction::AcceptWithText(text) => {
                if event.kind().accepts_text() {
                    Ok(Some(ResponseAction::Accept(Some(text))))
                } else {
                    Err(Error::UnsupportedDialogKind { kind: event.kind() })
                }
            }
        }
    }

    /// Boxes this action as the arbiter's response function.
    pub fn into_responder(self) -> EventResponder {
        Box::new(move |event: &DialogEvent| self.respond_to(event))
    }
}

/// What is done to the dialog handle, exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    /// Accept, with prompt text if given
    Accept(Option<String>),
    /// Dismiss
    Dismiss,
}

impl ResponseAction {
    /// Applies the response to the dialog handle.
    pub async fn apply(self, handle: &dyn DialogHandle) -> Result<()> {
        match self {
            ResponseAction::Accept(text) => handle.accept(text.as_deref()).await,
            ResponseAction::Dismiss => handle.dismiss().await,
        }
    }
}
