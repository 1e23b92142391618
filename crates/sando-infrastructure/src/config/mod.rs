//! Configuration
//!
//! Typed configuration plus a Figment-based loader merging defaults, a TOML
//! file and `SANDO__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
