// Public API types module
//
// This module contains configuration types shared by the arbiter and the
// interceptor. They follow the builder pattern used for driver options.

pub mod arbiter_options;

pub use arbiter_options::{ArbiterOptions, PROBE_ENV, TIMEOUT_ENV};
