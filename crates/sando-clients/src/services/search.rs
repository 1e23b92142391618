//! Search service

use crate::client::ApiClient;
use sando_domain::ApiResult;
use serde_json::Value;
use std::sync::Arc;

/// Typed access to the search service
#[derive(Clone, Debug)]
pub struct SearchClient {
    client: Arc<ApiClient>,
}

impl SearchClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Full-text search; the query is form-urlencoded
    pub async fn search(&self, query: &str) -> ApiResult<Value> {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.client.get(&format!("/search?q={encoded}")).await
    }

    pub fn inner(&self) -> &ApiClient {
        &self.client
    }
}
