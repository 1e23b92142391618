//! Domain Port Interfaces
//!
//! | Port | Description |
//! |------|-------------|
//! | [`Transport`] | Delivers requests (mock router or real network) |
//! | [`ServiceClient`] | Per-service client contract used by the factory |

/// Service client contract
pub mod client;
/// Request transport contract
pub mod transport;

pub use client::ServiceClient;
pub use transport::Transport;
