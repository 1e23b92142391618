//! # Sando
//!
//! Service client and request-routing layer for the temple community front
//! end: a pattern-based router with a middleware pipeline and a factory
//! managing one client per backend service.
//!
//! ## Example
//!
//! ```ignore
//! use sando::clients::ServiceClientFactory;
//! use sando::infrastructure::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! let factory = ServiceClientFactory::with_mock_backend(&config);
//! factory.login("aiko", "secret").await?;
//! let health = factory.get_system_health().await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, value objects and ports
//! - `infrastructure` - config, logging, router, cache, rate limiting
//! - `clients` - per-service clients, factory and mock backend
//! - `cli` - the `sando` command line

pub mod cli;

/// Domain layer - errors, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use sando_domain::*;
}

/// Infrastructure layer - config, logging, routing and shared state
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use sando_infrastructure::*;
}

/// Service clients - per-service clients and the factory
///
/// Re-exports from the clients crate for convenience
pub mod clients {
    pub use sando_clients::*;
}

pub use sando_clients::{ApiClient, ServiceClientFactory};
pub use sando_domain::{ApiError, ApiResult, Error, ErrorCode, Result};
