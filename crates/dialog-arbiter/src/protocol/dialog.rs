// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog event payload
//
// Represents one occurrence of a native browser dialog (alert, confirm,
// prompt, or beforeunload) as delivered by an event source, together with
// the handle used to close it.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The kind of native dialog the browser raised.
///
/// See: <https://playwright.dev/docs/api/class-dialog#dialog-type>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// Simple notification dialog (OK only)
    Alert,
    /// Yes/No confirmation dialog
    Confirm,
    /// Text input dialog
    Prompt,
    /// Page unload confirmation dialog
    #[serde(rename = "beforeunload")]
    BeforeUnload,
}

impl DialogKind {
    /// Returns the protocol name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
            DialogKind::BeforeUnload => "beforeunload",
        }
    }

    /// Returns true if the dialog can be accepted with input text.
    pub fn accepts_text(&self) -> bool {
        matches!(self, DialogKind::Prompt)
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alert" => Ok(DialogKind::Alert),
            "confirm" => Ok(DialogKind::Confirm),
            "prompt" => Ok(DialogKind::Prompt),
            "beforeunload" => Ok(DialogKind::BeforeUnload),
            other => Err(Error::InvalidArgument(format!(
                "Unknown dialog type '{}'",
                other
            ))),
        }
    }
}

/// The browser-side handle of an open dialog.
///
/// Implemented by the driver (see the `playwright` feature) or by test
/// doubles. Each method is called at most once per [`DialogEvent`] by this
/// crate; a call after the browser already closed the dialog is a no-op at
/// the driver boundary.
#[async_trait]
pub trait DialogHandle: Send + Sync {
    /// Accepts the dialog, optionally entering text into a prompt.
    async fn accept(&self, prompt_text: Option<&str>) -> Result<()>;

    /// Dismisses the dialog ("Cancel" for confirm and prompt dialogs).
    async fn dismiss(&self) -> Result<()>;
}

/// One native dialog occurrence.
///
/// Delivered by the event source exactly once and consumed by whichever
/// arbitration is subscribed at that moment. Cloning shares the handle.
#[derive(Clone)]
pub struct DialogEvent {
    kind: DialogKind,
    message: String,
    default_value: String,
    handle: Arc<dyn DialogHandle>,
}

impl DialogEvent {
    /// Creates a dialog event with an empty default value.
    pub fn new(kind: DialogKind, message: impl Into<String>, handle: Arc<dyn DialogHandle>) -> Self {
        Self {
            kind,
            message: message.into(),
            default_value: String::new(),
            handle,
        }
    }

    /// Sets the prompt's pre-filled value.
    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Returns the dialog's kind.
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Returns the message displayed in the dialog.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the pre-filled value of a prompt, or an empty string.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Returns the handle used to close the dialog.
    pub fn handle(&self) -> &Arc<dyn DialogHandle> {
        &self.handle
    }

    /// Consumes the event, returning its message.
    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Debug for DialogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogEvent")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("default_value", &self.default_value)
            .finish()
    }
}
