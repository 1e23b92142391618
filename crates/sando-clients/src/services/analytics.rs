//! Analytics service

use crate::client::ApiClient;
use sando_domain::ApiResult;
use serde_json::Value;
use std::sync::Arc;

/// Typed access to the analytics service
#[derive(Clone, Debug)]
pub struct AnalyticsClient {
    client: Arc<ApiClient>,
}

impl AnalyticsClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Aggregated traffic figures; needs an authenticated client
    pub async fn overview(&self) -> ApiResult<Value> {
        self.client.get("/analytics/overview").await
    }

    /// Record a client-side event
    pub async fn track_event(&self, event: Value) -> ApiResult<Value> {
        self.client.post("/analytics/events", event).await
    }

    pub fn inner(&self) -> &ApiClient {
        &self.client
    }
}
