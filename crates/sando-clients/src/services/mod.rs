//! Typed per-service clients
//!
//! Thin wrappers over [`ApiClient`](crate::client::ApiClient) exposing the
//! calls each service offers.

pub mod admin;
pub mod analytics;
pub mod community;
pub mod content;
pub mod search;

pub use admin::AdminClient;
pub use analytics::AnalyticsClient;
pub use community::CommunityClient;
pub use content::ContentClient;
pub use search::SearchClient;
