//! Per-service API client
//!
//! Each call goes through, in order: the client rate limit, the response
//! cache (GET only), the transport with default headers and bearer token,
//! a per-attempt timeout and exponential-backoff retries for transport
//! failures. Successful GET responses are stored on the way out.
//!
//! Cached responses belong to the session that fetched them: any change of
//! bearer token empties the cache.

use arc_swap::{ArcSwap, ArcSwapOption};
use async_trait::async_trait;
use sando_domain::constants::{AUTHORIZATION_HEADER, HEALTH_PATH_PREFIX};
use sando_domain::ports::{ServiceClient, Transport};
use sando_domain::{ApiError, ApiRequest, ApiResult, HttpMethod, ServiceName};
use sando_infrastructure::auth::bearer_header_value;
use sando_infrastructure::cache::{CacheStats, ResponseCache};
use sando_infrastructure::config::ClientConfig;
use sando_infrastructure::constants::CLIENT_MAX_RETRY_DELAY_MS;
use sando_infrastructure::rate_limit::RateLimiter;
use sando_infrastructure::utils::backoff_delay;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration plus the state derived from it
///
/// Swapped as a whole so a config update always comes with a fresh cache
/// and rate limit window.
struct ClientState {
    config: ClientConfig,
    cache: ResponseCache,
    limiter: RateLimiter,
}

impl ClientState {
    fn new(config: ClientConfig) -> Self {
        Self {
            cache: ResponseCache::new(&config.cache),
            limiter: RateLimiter::new(config.rate_limit),
            config,
        }
    }
}

/// Client for one logical service
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    state: ArcSwap<ClientState>,
    token: ArcSwapOption<String>,
}

impl ApiClient {
    /// Create a client over the given transport
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        debug!(
            service = %config.service,
            base_address = %config.base_address,
            transport = transport.name(),
            "Creating API client"
        );
        Self {
            transport,
            state: ArcSwap::from_pointee(ClientState::new(config)),
            token: ArcSwapOption::empty(),
        }
    }

    /// Service this client talks to
    pub fn service(&self) -> ServiceName {
        self.state.load().config.service
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> ClientConfig {
        self.state.load().config.clone()
    }

    /// Replace the configuration, dropping the cache and rate limit window
    pub fn update_config(&self, config: ClientConfig) {
        debug!(service = %config.service, "Updating client configuration");
        self.state.store(Arc::new(ClientState::new(config)));
    }

    /// Hit/miss counters of the response cache
    pub fn cache_stats(&self) -> CacheStats {
        self.state.load().cache.stats()
    }

    /// Currently configured bearer token
    pub fn auth_token(&self) -> Option<String> {
        self.token.load_full().map(|t| t.as_ref().clone())
    }

    /// Issue a request relative to the service base address
    pub async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let state = self.state.load_full();
        let service = state.config.service;

        state.limiter.enforce(service.as_str())?;

        let request = self.build_request(&state.config, method, url, body);
        let cache_key =
            (method == HttpMethod::Get && state.cache.is_enabled()).then(|| request.signature());

        if let Some(key) = &cache_key
            && let Some(hit) = state.cache.get(key).await
        {
            debug!(%service, key = %key, "Cache hit");
            return Ok(hit);
        }

        let response = self.dispatch_with_retry(&state.config, request).await?;

        if let Some(key) = cache_key {
            state.cache.insert(key, response.clone()).await;
        }
        Ok(response)
    }

    pub async fn get(&self, url: &str) -> ApiResult<Value> {
        self.request(HttpMethod::Get, url, None).await
    }

    pub async fn post(&self, url: &str, body: Value) -> ApiResult<Value> {
        self.request(HttpMethod::Post, url, Some(body)).await
    }

    pub async fn put(&self, url: &str, body: Value) -> ApiResult<Value> {
        self.request(HttpMethod::Put, url, Some(body)).await
    }

    pub async fn patch(&self, url: &str, body: Value) -> ApiResult<Value> {
        self.request(HttpMethod::Patch, url, Some(body)).await
    }

    pub async fn delete(&self, url: &str) -> ApiResult<Value> {
        self.request(HttpMethod::Delete, url, None).await
    }

    /// Probe `GET /health/{service}`, bypassing cache, rate limit and retries
    pub async fn health_check(&self) -> ApiResult<Value> {
        let state = self.state.load_full();
        let url = format!("{HEALTH_PATH_PREFIX}/{}", state.config.service);
        let request = self.build_request(&state.config, HttpMethod::Get, &url, None);
        self.dispatch_once(&state.config, request).await
    }

    fn build_request(
        &self,
        config: &ClientConfig,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> ApiRequest {
        let mut headers = config.default_headers.clone();
        if let Some(token) = self.token.load().as_deref() {
            headers.insert(AUTHORIZATION_HEADER, bearer_header_value(token));
        }
        let mut request = ApiRequest::new(method, url).with_headers(headers);
        request.body = body;
        request
    }

    async fn dispatch_once(&self, config: &ClientConfig, request: ApiRequest) -> ApiResult<Value> {
        match tokio::time::timeout(config.timeout, self.transport.dispatch(request)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::network(format!(
                "Request to {} timed out after {}ms",
                config.service,
                config.timeout.as_millis()
            ))),
        }
    }

    async fn dispatch_with_retry(
        &self,
        config: &ClientConfig,
        request: ApiRequest,
    ) -> ApiResult<Value> {
        let max_delay = Duration::from_millis(CLIENT_MAX_RETRY_DELAY_MS);
        let mut attempt = 0u32;
        loop {
            match self.dispatch_once(config, request.clone()).await {
                Err(err) if err.is_retryable() && attempt < config.retries => {
                    let delay = backoff_delay(config.retry_delay, attempt, max_delay);
                    warn!(
                        service = %config.service,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.load();
        f.debug_struct("ApiClient")
            .field("service", &state.config.service)
            .field("base_address", &state.config.base_address)
            .field("transport", &self.transport.name())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ServiceClient for ApiClient {
    fn service(&self) -> ServiceName {
        ApiClient::service(self)
    }

    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        ApiClient::request(self, method, url, body).await
    }

    async fn health_check(&self) -> ApiResult<Value> {
        ApiClient::health_check(self).await
    }

    fn set_auth_token(&self, token: &str) {
        let previous = self.token.swap(Some(Arc::new(token.to_string())));
        if previous.as_deref().map(String::as_str) != Some(token) {
            self.clear_cache();
        }
    }

    fn clear_auth_token(&self) {
        if self.token.swap(None).is_some() {
            self.clear_cache();
        }
    }

    fn is_authenticated(&self) -> bool {
        self.token.load().is_some()
    }

    fn clear_cache(&self) {
        self.state.load().cache.clear();
    }

    fn reset_rate_limit(&self) {
        self.state.load().limiter.reset_all();
    }
}
