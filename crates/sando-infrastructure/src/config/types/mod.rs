//! Configuration types module

pub mod app;
pub mod client;
pub mod logging;
pub mod mock;

pub use app::AppConfig;
pub use client::{
    CachePolicy, ClientConfig, ClientSettings, Environment, RateLimitPolicy,
};
pub use logging::LoggingConfig;
pub use mock::MockServerConfig;
