//! Endpoint registrations

use super::template::PathTemplate;
use futures::future::BoxFuture;
use sando_domain::{ApiResult, HttpMethod, Params};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Future returned by an endpoint handler
pub type HandlerFuture = BoxFuture<'static, ApiResult<Value>>;

/// Async function from (parameters, body) to a JSON result
///
/// Implemented for every matching closure, so handlers are usually written
/// as `|params, body| async move { ... }`.
pub trait EndpointHandler: Send + Sync {
    /// Handle one matched request
    fn call(&self, params: Params, body: Option<Value>) -> HandlerFuture;
}

impl<F, Fut> EndpointHandler for F
where
    F: Fn(Params, Option<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = ApiResult<Value>> + Send + 'static,
{
    fn call(&self, params: Params, body: Option<Value>) -> HandlerFuture {
        Box::pin(self(params, body))
    }
}

/// A registered route
#[derive(Clone)]
pub struct Endpoint {
    method: HttpMethod,
    template: PathTemplate,
    handler: Arc<dyn EndpointHandler>,
    require_auth: bool,
    delay: Option<Duration>,
}

impl Endpoint {
    /// Create a public endpoint
    pub fn new<F, Fut>(method: HttpMethod, template: &str, handler: F) -> Self
    where
        F: Fn(Params, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ApiResult<Value>> + Send + 'static,
    {
        Self {
            method,
            template: PathTemplate::parse(template),
            handler: Arc::new(handler),
            require_auth: false,
            delay: None,
        }
    }

    /// Require a valid bearer token
    pub fn with_auth(mut self) -> Self {
        self.require_auth = true;
        self
    }

    /// Override the router default latency for this endpoint
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    pub fn requires_auth(&self) -> bool {
        self.require_auth
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    pub(crate) fn handler(&self) -> &dyn EndpointHandler {
        self.handler.as_ref()
    }

    /// Diagnostic view of the registration
    pub fn info(&self) -> EndpointInfo {
        EndpointInfo {
            method: self.method,
            template: self.template.as_str().to_string(),
            require_auth: self.require_auth,
            delay_ms: self
                .delay
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .field("require_auth", &self.require_auth)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

/// Registered route as listed by `MockRouter::endpoints`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    pub method: HttpMethod,
    pub template: String,
    pub require_auth: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}
