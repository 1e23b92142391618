//! In-process request router
//!
//! Matches a request against the registered endpoints, applies the auth
//! guard, runs the handler and passes its success value through the
//! middleware pipeline (delay, failure injection, rate limit).

use super::endpoint::{Endpoint, EndpointInfo};
use super::middleware::{
    DelayMiddleware, DispatchContext, FailureInjectionMiddleware, MiddlewarePipeline,
    RateLimitMiddleware,
};
use super::template::{parse_query, split_path, split_url};
use crate::auth::AuthTokenStore;
use crate::config::MockServerConfig;
use crate::rate_limit::RateLimiter;
use async_trait::async_trait;
use sando_domain::ports::Transport;
use sando_domain::{ApiError, ApiRequest, ApiResult, Headers, HttpMethod, MatchedRequest, Params};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

/// Builder collecting endpoint registrations
///
/// Registrations are append-only; overlapping templates resolve to the
/// first one registered.
pub struct RouterBuilder {
    config: MockServerConfig,
    endpoints: Vec<Endpoint>,
    token_store: Option<AuthTokenStore>,
}

impl RouterBuilder {
    /// Start a router with the given behaviour
    pub fn new(config: MockServerConfig) -> Self {
        Self {
            config,
            endpoints: Vec::new(),
            token_store: None,
        }
    }

    /// Share an existing token store instead of creating one from the config
    pub fn with_token_store(mut self, store: AuthTokenStore) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Register an endpoint
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn get<F, Fut>(self, template: &str, handler: F) -> Self
    where
        F: Fn(Params, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Value>> + Send + 'static,
    {
        self.endpoint(Endpoint::new(HttpMethod::Get, template, handler))
    }

    pub fn post<F, Fut>(self, template: &str, handler: F) -> Self
    where
        F: Fn(Params, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Value>> + Send + 'static,
    {
        self.endpoint(Endpoint::new(HttpMethod::Post, template, handler))
    }

    pub fn put<F, Fut>(self, template: &str, handler: F) -> Self
    where
        F: Fn(Params, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Value>> + Send + 'static,
    {
        self.endpoint(Endpoint::new(HttpMethod::Put, template, handler))
    }

    pub fn patch<F, Fut>(self, template: &str, handler: F) -> Self
    where
        F: Fn(Params, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Value>> + Send + 'static,
    {
        self.endpoint(Endpoint::new(HttpMethod::Patch, template, handler))
    }

    pub fn delete<F, Fut>(self, template: &str, handler: F) -> Self
    where
        F: Fn(Params, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Value>> + Send + 'static,
    {
        self.endpoint(Endpoint::new(HttpMethod::Delete, template, handler))
    }

    /// Freeze the registrations
    pub fn build(self) -> MockRouter {
        let token_store = self
            .token_store
            .unwrap_or_else(|| AuthTokenStore::with_tokens(self.config.dev_tokens.iter().cloned()));
        let limiter = RateLimiter::new(self.config.rate_limit());
        let pipeline = MiddlewarePipeline::new()
            .with(DelayMiddleware)
            .with(FailureInjectionMiddleware::new(self.config.failure_rate))
            .with(RateLimitMiddleware::new(limiter.clone()));

        debug!(
            endpoints = self.endpoints.len(),
            require_auth = self.config.require_auth,
            failure_rate = self.config.failure_rate,
            "Router built"
        );

        MockRouter {
            endpoints: self.endpoints,
            require_auth: self.config.require_auth,
            default_delay: self.config.default_delay(),
            token_store,
            limiter,
            pipeline,
        }
    }
}

/// Immutable request router
pub struct MockRouter {
    endpoints: Vec<Endpoint>,
    require_auth: bool,
    default_delay: Duration,
    token_store: AuthTokenStore,
    limiter: RateLimiter,
    pipeline: MiddlewarePipeline,
}

impl MockRouter {
    /// Start building a router
    pub fn builder(config: MockServerConfig) -> RouterBuilder {
        RouterBuilder::new(config)
    }

    /// Dispatch one request
    ///
    /// Handler errors are returned unchanged; only success values go
    /// through the middleware pipeline.
    pub async fn handle(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
        headers: Headers,
    ) -> ApiResult<Value> {
        let (path, query) = split_url(url);
        let (endpoint, request) = self.route(method, path, query, body, headers)?;

        if endpoint.requires_auth() || self.require_auth {
            self.token_store.authorize(&request.headers)?;
        }

        let params = request.merged_params();
        trace!(%method, path = %request.path, ?params, "Invoking handler");
        let response = endpoint.handler().call(params, request.body).await?;

        let ctx = DispatchContext {
            method,
            path: request.path,
            delay: endpoint.delay().unwrap_or(self.default_delay),
        };
        self.pipeline.run(&ctx, response).await
    }

    fn route(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&str>,
        body: Option<Value>,
        headers: Headers,
    ) -> ApiResult<(&Endpoint, MatchedRequest)> {
        let segments = split_path(path);
        let (endpoint, path_params) = self
            .endpoints
            .iter()
            .filter(|e| e.method() == method)
            .find_map(|e| e.template().matches(&segments).map(|p| (e, p)))
            .ok_or_else(|| {
                debug!(%method, path, "No route matched");
                ApiError::not_found(format!("No route for {method} {path}"))
            })?;

        Ok((
            endpoint,
            MatchedRequest {
                method,
                path: path.to_string(),
                path_params,
                query_params: query.map(parse_query).unwrap_or_default(),
                headers,
                body,
            },
        ))
    }

    /// Registered endpoints in registration order
    pub fn endpoints(&self) -> Vec<EndpointInfo> {
        self.endpoints.iter().map(Endpoint::info).collect()
    }

    /// Start a fresh router-wide rate limit window
    pub fn reset_rate_limit(&self) {
        self.limiter.reset_all();
    }

    /// Token store consulted by the auth guard
    pub fn token_store(&self) -> &AuthTokenStore {
        &self.token_store
    }

    /// Whether every endpoint requires auth
    pub fn requires_auth(&self) -> bool {
        self.require_auth
    }
}

impl std::fmt::Debug for MockRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRouter")
            .field("endpoints", &self.endpoints.len())
            .field("require_auth", &self.require_auth)
            .field("default_delay", &self.default_delay)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for MockRouter {
    async fn dispatch(&self, request: ApiRequest) -> ApiResult<Value> {
        self.handle(request.method, &request.url, request.body, request.headers)
            .await
    }

    fn reset_rate_limits(&self) {
        self.reset_rate_limit();
    }

    fn name(&self) -> &str {
        "mock"
    }
}
