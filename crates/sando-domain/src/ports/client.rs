//! Service Client Port
//!
//! Contract every per-service client fulfils, whatever transport sits
//! beneath it.

use crate::error::ApiResult;
use crate::value_objects::{HttpMethod, ServiceName};
use async_trait::async_trait;

/// Per-service client contract
///
/// # Example
///
/// ```ignore
/// let temple = client.request(HttpMethod::Get, "/temples/42", None).await?;
/// client.set_auth_token("dev-token");
/// assert!(client.is_authenticated());
/// ```
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Service this client talks to
    fn service(&self) -> ServiceName;

    /// Issue a request relative to the service base address
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<serde_json::Value>;

    /// Probe the service health endpoint
    async fn health_check(&self) -> ApiResult<serde_json::Value>;

    /// Use the given bearer token for subsequent requests
    fn set_auth_token(&self, token: &str);

    /// Stop sending a bearer token
    fn clear_auth_token(&self);

    /// Whether a bearer token is set
    fn is_authenticated(&self) -> bool;

    /// Drop every cached response
    fn clear_cache(&self);

    /// Start a fresh rate limit window
    fn reset_rate_limit(&self);
}
