//! Community service: groups, members and sessions

use crate::client::ApiClient;
use sando_domain::ApiResult;
use sando_infrastructure::routing::encode_segment;
use serde_json::{Value, json};
use std::sync::Arc;

/// Typed access to the community service
#[derive(Clone, Debug)]
pub struct CommunityClient {
    client: Arc<ApiClient>,
}

impl CommunityClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn groups(&self) -> ApiResult<Value> {
        self.client.get("/groups").await
    }

    pub async fn group(&self, group_id: &str) -> ApiResult<Value> {
        self.client
            .get(&format!("/groups/{}", encode_segment(group_id)))
            .await
    }

    /// Join a group; needs an authenticated client
    pub async fn join_group(&self, group_id: &str) -> ApiResult<Value> {
        self.client
            .post(
                &format!("/groups/{}/join", encode_segment(group_id)),
                json!({}),
            )
            .await
    }

    pub async fn member(&self, member_id: &str) -> ApiResult<Value> {
        self.client
            .get(&format!("/members/{}", encode_segment(member_id)))
            .await
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Value> {
        self.client
            .post(
                "/auth/login",
                json!({ "username": username, "password": password }),
            )
            .await
    }

    /// End the session identified by `token`
    pub async fn logout(&self, token: &str) -> ApiResult<Value> {
        self.client
            .post("/auth/logout", json!({ "token": token }))
            .await
    }

    /// Underlying generic client
    pub fn inner(&self) -> &ApiClient {
        &self.client
    }
}
