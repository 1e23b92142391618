//! # Infrastructure Layer
//!
//! Cross-cutting machinery behind the service clients:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration loading |
//! | [`logging`] | Tracing subscriber setup |
//! | [`routing`] | Path templates, router and middleware pipeline |
//! | [`auth`] | Shared bearer token store |
//! | [`rate_limit`] | Keyed fixed-window limiter |
//! | [`cache`] | Moka-backed response cache |
//! | [`health`] | Concurrent service health probing |

pub mod auth;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod health;
pub mod logging;
pub mod rate_limit;
pub mod routing;
pub mod utils;

pub use auth::AuthTokenStore;
pub use cache::{CacheStats, ResponseCache};
pub use config::{AppConfig, ConfigLoader};
pub use health::HealthRegistry;
pub use logging::init_logging;
pub use rate_limit::{RateLimitResult, RateLimiter};
pub use routing::{Endpoint, MockRouter, RouterBuilder};
