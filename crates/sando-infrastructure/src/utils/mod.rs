//! Shared utilities

mod timing;

pub use timing::{backoff_delay, TimedOperation};
