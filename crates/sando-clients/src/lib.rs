//! # Service Clients
//!
//! One [`ApiClient`] per backend service, a [`ServiceClientFactory`] that
//! manages them together and a seeded [`mock`] backend to run them against.
//!
//! ```ignore
//! let config = ConfigLoader::new().load()?;
//! let factory = ServiceClientFactory::with_mock_backend(&config);
//! let temple = factory.content().temple("42").await?;
//! ```

pub mod client;
pub mod factory;
pub mod mock;
pub mod services;

pub use client::ApiClient;
pub use factory::{ClientSet, ServiceClientFactory};
pub use services::{AdminClient, AnalyticsClient, CommunityClient, ContentClient, SearchClient};
