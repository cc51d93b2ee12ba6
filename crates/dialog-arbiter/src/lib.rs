//! dialog-arbiter: One-shot interception of native browser dialogs
//!
//! Alerts, confirms and prompts block the page until they are closed, and
//! they can only be caught by a listener registered before they appear.
//! This crate races one such dialog against a timeout, resolves exactly
//! once, always removes its listener, and applies the response you asked
//! for to whatever fired.
//!
//! # Examples
//!
//! ## Accepting a Confirm (Playwright)
//!
//! Requires the `playwright` feature.
//!
//! ```ignore
//! use dialog_arbiter::DialogInterceptor;
//! use playwright_rs::Playwright;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let playwright = Playwright::launch().await?;
//!     let browser = playwright.chromium().launch().await?;
//!     let page = browser.new_page().await?;
//!     let interceptor = DialogInterceptor::for_page(&page).await?;
//!
//!     page.goto("https://the-internet.herokuapp.com/javascript_alerts", None)
//!         .await?;
//!     let button = page.locator("button:has-text('Click for JS Confirm')").await;
//!
//!     let text = interceptor
//!         .execute_with_dialog(button.click(None), true, None)
//!         .await?;
//!     assert_eq!(text.message(), Some("I am a JS Confirm"));
//!
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Driving a DialogHub Directly
//!
//! Any driver can feed its dialogs into a [`DialogHub`]:
//!
//! ```ignore
//! use dialog_arbiter::{DialogEvent, DialogHub, DialogInterceptor, DialogKind};
//!
//! let hub = DialogHub::new();
//! let interceptor = DialogInterceptor::new(hub.clone());
//!
//! let waiting = tokio::spawn({
//!     let interceptor = interceptor.clone();
//!     async move { interceptor.accept_with_text("Ada", None).await }
//! });
//!
//! // Driver side, once the listener is in place
//! hub.dispatch(DialogEvent::new(DialogKind::Prompt, "Enter name", handle));
//! assert!(waiting.await??);
//! ```
//!
//! ## Lower-Level Arbitration
//!
//! ```ignore
//! use dialog_arbiter::{ArbitrationRequest, DialogAction, EventArbiter};
//! use std::time::Duration;
//!
//! let arbiter = EventArbiter::new(hub.clone());
//! let pending = arbiter.begin(ArbitrationRequest::for_action(
//!     DialogAction::Dismiss,
//!     Duration::from_secs(2),
//! ))?;
//! // ... trigger the dialog ...
//! let result = pending.settle().await?;
//! ```

pub mod api;
mod arbiter;
mod error;
mod interceptor;
mod policy;
pub mod protocol;

/// Default time in milliseconds to wait for a dialog.
///
/// Matches the latency budget end-to-end suites use for a dialog to appear
/// after the triggering action.
pub const DEFAULT_DIALOG_TIMEOUT_MS: u64 = 10_000;

/// Default window in milliseconds for [`DialogInterceptor::is_dialog_present`].
pub const DEFAULT_PRESENCE_PROBE_MS: u64 = 100;

// Re-export error types
pub use error::{Error, Result};

// Re-export the arbitration core
pub use arbiter::{
    ArbitrationRequest, ArbitrationResult, DEFAULT_DIALOG_TIMEOUT, EventArbiter,
    PendingArbitration,
};
pub use policy::{DialogAction, EventResponder, ResponseAction};

// Re-export the interceptor API
pub use interceptor::{DialogInterceptor, DialogText};

// Re-export dialog and event source types
pub use protocol::{
    DialogEvent, DialogHandle, DialogHub, DialogKind, DialogListener, EventSource, Subscription,
};

// Re-export options
pub use api::ArbiterOptions;
