//! Domain Value Objects
//!
//! Immutable values exchanged between the router, the clients and their
//! callers.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`HttpMethod`] | Request method accepted by the router |
//! | [`ApiRequest`] | Outgoing request as seen by a transport |
//! | [`MatchedRequest`] | Request after a route matched |
//! | [`Headers`] | Case-insensitive header map |
//! | [`ServiceName`] | Logical backend service |
//! | [`HealthStatusEntry`] | Result of one health probe |
//! | [`SystemHealth`] | Aggregated verdict over all probes |

/// Health probe results and aggregation
pub mod health;
/// Request method
pub mod method;
/// Requests and headers
pub mod request;
/// Service names
pub mod service;

pub use health::{HealthStatusEntry, HealthSummary, SystemHealth, SystemHealthStatus};
pub use method::HttpMethod;
pub use request::{ApiRequest, Headers, MatchedRequest, Params};
pub use service::ServiceName;
