//! Admin service

use crate::client::ApiClient;
use sando_domain::ApiResult;
use serde_json::{Value, json};
use std::sync::Arc;

/// Typed access to the admin service; every call needs authentication
#[derive(Clone, Debug)]
pub struct AdminClient {
    client: Arc<ApiClient>,
}

impl AdminClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<Value> {
        self.client.get("/admin/stats").await
    }

    /// Revoke a session token server-side
    pub async fn revoke_token(&self, token: &str) -> ApiResult<Value> {
        self.client
            .post("/admin/tokens/revoke", json!({ "token": token }))
            .await
    }

    pub fn inner(&self) -> &ApiClient {
        &self.client
    }
}
