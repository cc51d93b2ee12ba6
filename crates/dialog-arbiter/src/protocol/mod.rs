// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Protocol Objects - dialog events and the sources that deliver them
//
// Architecture:
// - DialogEvent carries one native dialog and its DialogHandle
// - EventSource is the seam the arbiter subscribes to
// - DialogHub is the in-process EventSource drivers feed dialogs into
// - The `playwright` feature attaches a DialogHub to a Playwright page

pub mod dialog;
pub mod dialog_hub;
pub mod event_source;
#[cfg(feature = "playwright")]
pub mod playwright_dialogs;

pub use dialog::{DialogEvent, DialogHandle, DialogKind};
pub use dialog_hub::DialogHub;
pub use event_source::{DialogListener, EventSource, Subscription, next_subscription_id};
#[cfg(feature = "playwright")]
pub use playwright_dialogs::{attach_page, dialog_event};
