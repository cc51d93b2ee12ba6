// Options for DialogInterceptor
//
// Timeouts are expressed in milliseconds, like the driver's own options.
// Unset fields fall back to DEFAULT_DIALOG_TIMEOUT_MS and
// DEFAULT_PRESENCE_PROBE_MS.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding the default dialog timeout (milliseconds)
pub const TIMEOUT_ENV: &str = "DIALOG_ARBITER_TIMEOUT_MS";

/// Environment variable overriding the presence-probe window (milliseconds)
pub const PROBE_ENV: &str = "DIALOG_ARBITER_PROBE_MS";

/// Options for intercepting dialogs on one page
///
/// All options are optional and fall back to the crate defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbiterOptions {
    /// Default time to wait for a dialog in milliseconds (default: 10000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,

    /// Window used by `is_dialog_present` in milliseconds (default: 100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_probe: Option<f64>,
}

impl ArbiterOptions {
    /// Creates a new ArbiterOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads overrides from `DIALOG_ARBITER_TIMEOUT_MS` and
    /// `DIALOG_ARBITER_PROBE_MS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a variable is set but is not a
    /// non-negative number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parse = |key: &str| -> Result<Option<f64>> {
            match lookup(key) {
                None => Ok(None),
                Some(raw) => {
                    let value: f64 = raw.trim().parse().map_err(|_| {
                        Error::InvalidArgument(format!("{} must be a number, got '{}'", key, raw))
                    })?;
                    if !value.is_finite() || value < 0.0 {
                        return Err(Error::InvalidArgument(format!(
                            "{} must be a non-negative number of milliseconds, got '{}'",
                            key, raw
                        )));
                    }
                    Ok(Some(value))
                }
            }
        };

        Ok(Self {
            timeout: parse(TIMEOUT_ENV)?,
            presence_probe: parse(PROBE_ENV)?,
        })
    }

    /// Set the default dialog timeout in milliseconds
    pub fn timeout(mut self, timeout: f64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the presence-probe window in milliseconds
    pub fn presence_probe(mut self, probe: f64) -> Self {
        self.presence_probe = Some(probe);
        self
    }

    /// Default dialog timeout as a Duration
    pub fn timeout_duration(&self) -> Duration {
        millis(self.timeout.unwrap_or(crate::DEFAULT_DIALOG_TIMEOUT_MS as f64))
    }

    /// Presence-probe window as a Duration
    pub fn presence_probe_duration(&self) -> Duration {
        millis(
            self.presence_probe
                .unwrap_or(crate::DEFAULT_PRESENCE_PROBE_MS as f64),
        )
    }
}

// Negative or NaN collapse to zero, anything past Duration::MAX saturates
fn millis(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}
