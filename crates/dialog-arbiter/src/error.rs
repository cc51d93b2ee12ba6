// Error types for dialog-arbiter

use crate::protocol::DialogKind;
use thiserror::Error;

/// Result type alias for dialog-arbiter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while intercepting a native dialog
///
/// A timed-out wait is not an error: it is reported as data through
/// [`ArbitrationResult::TimedOut`](crate::ArbitrationResult) and
/// [`DialogText::TimedOut`](crate::DialogText).
#[derive(Debug, Error)]
pub enum Error {
    /// Another arbitration is already subscribed on the same page context
    ///
    /// The browser shows at most one native dialog per page, so overlapping
    /// waits are a caller error. Await the first operation before starting
    /// the next one.
    #[error("A dialog arbitration is already active on this page context")]
    AlreadyArbitrating,

    /// The requested action only applies to prompt dialogs
    ///
    /// The captured dialog is left open; follow up with an explicit
    /// accept or dismiss if the page must proceed.
    #[error("Cannot accept a '{kind}' dialog with text: only prompt dialogs take input")]
    UnsupportedDialogKind { kind: DialogKind },

    /// A listener was still registered after its arbitration finished
    ///
    /// Only produced by [`EventArbiter::ensure_released`](crate::EventArbiter::ensure_released).
    #[error("Dialog listener leaked: {remaining} subscriber(s) left after arbitration")]
    ListenerLeak { remaining: usize },

    /// The event source dropped the listener without delivering an event
    #[error("Dialog event source closed before the arbitration resolved")]
    SourceClosed,

    /// The dialog handle failed to accept or dismiss
    #[error("Dialog handle error: {0}")]
    DialogHandle(String),

    /// The trigger action passed to `execute_with_dialog` failed
    #[error("Trigger action failed: {0}")]
    TriggerFailed(String),

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}

#[cfg(feature = "playwright")]
impl From<playwright_rs::Error> for Error {
    fn from(err: playwright_rs::Error) -> Self {
        Error::DialogHandle(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_message_names_kind() {
        let err = Error::UnsupportedDialogKind {
            kind: DialogKind::Alert,
        };
        assert!(err.to_string().contains("'alert'"));
    }

    #[test]
    fn test_context_wraps_source() {
        let err = Error::SourceClosed.context("waiting for confirm");
        assert_eq!(
            err.to_string(),
            "waiting for confirm: Dialog event source closed before the arbitration resolved"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
