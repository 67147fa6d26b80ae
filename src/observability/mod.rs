//! Observability module
//!
//! Structured logging for resolution runs.

pub mod logging;

pub use logging::{LogFormat, init_logging};
