//! Transport Port
//!
//! The seam between a service client and whatever answers its requests. The
//! in-process mock router implements it today; a real network transport
//! implementing the same contract can replace it without touching clients.

use crate::error::ApiResult;
use crate::value_objects::ApiRequest;
use async_trait::async_trait;

/// Request transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver a request and return the decoded JSON response
    async fn dispatch(&self, request: ApiRequest) -> ApiResult<serde_json::Value>;

    /// Reset any server-side rate limit windows
    fn reset_rate_limits(&self) {}

    /// Short name used in logs
    fn name(&self) -> &str;
}
