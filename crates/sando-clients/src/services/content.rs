//! Content service: temples and articles

use crate::client::ApiClient;
use sando_domain::ApiResult;
use sando_infrastructure::routing::encode_segment;
use serde_json::Value;
use std::sync::Arc;

/// Typed access to the content service
#[derive(Clone, Debug)]
pub struct ContentClient {
    client: Arc<ApiClient>,
}

impl ContentClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn temples(&self) -> ApiResult<Value> {
        self.client.get("/temples").await
    }

    pub async fn temple(&self, id: &str) -> ApiResult<Value> {
        self.client
            .get(&format!("/temples/{}", encode_segment(id)))
            .await
    }

    pub async fn articles(&self) -> ApiResult<Value> {
        self.client.get("/articles").await
    }

    pub async fn article(&self, slug: &str) -> ApiResult<Value> {
        self.client
            .get(&format!("/articles/{}", encode_segment(slug)))
            .await
    }

    /// Underlying generic client
    pub fn inner(&self) -> &ApiClient {
        &self.client
    }
}
