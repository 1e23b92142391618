//! Response middleware
//!
//! Stages run on successful handler results only, in registration order.
//! The first stage that fails replaces the response with its error.

use crate::constants::ROUTER_RATE_LIMIT_KEY;
use crate::rate_limit::RateLimiter;
use async_trait::async_trait;
use sando_domain::{ApiError, ApiResult, HttpMethod};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-dispatch facts the stages may consult
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub method: HttpMethod,
    pub path: String,
    /// Effective simulated latency for the matched endpoint
    pub delay: Duration,
}

/// A stage in the response pipeline
#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    /// Stage name used in logs
    fn name(&self) -> &'static str;

    /// Pass the response through or replace it with an error
    async fn process(&self, ctx: &DispatchContext, response: Value) -> ApiResult<Value>;
}

/// Sleeps for the endpoint latency before answering
#[derive(Debug, Default, Clone, Copy)]
pub struct DelayMiddleware;

#[async_trait]
impl ResponseMiddleware for DelayMiddleware {
    fn name(&self) -> &'static str {
        "delay"
    }

    async fn process(&self, ctx: &DispatchContext, response: Value) -> ApiResult<Value> {
        if !ctx.delay.is_zero() {
            tokio::time::sleep(ctx.delay).await;
        }
        Ok(response)
    }
}

/// Replaces a success with a `NetworkError` with fixed probability
#[derive(Debug, Clone, Copy)]
pub struct FailureInjectionMiddleware {
    rate: f64,
}

impl FailureInjectionMiddleware {
    /// Rate is clamped to `[0, 1]`
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

#[async_trait]
impl ResponseMiddleware for FailureInjectionMiddleware {
    fn name(&self) -> &'static str {
        "failure-injection"
    }

    async fn process(&self, ctx: &DispatchContext, response: Value) -> ApiResult<Value> {
        if self.rate > 0.0 && rand::random::<f64>() < self.rate {
            debug!(method = %ctx.method, path = %ctx.path, "Injected network failure");
            return Err(ApiError::network(format!(
                "Simulated network failure for {} {}",
                ctx.method, ctx.path
            )));
        }
        Ok(response)
    }
}

/// Coarse router-wide fixed-window limit
#[derive(Debug, Clone)]
pub struct RateLimitMiddleware {
    limiter: RateLimiter,
}

impl RateLimitMiddleware {
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }
}

#[async_trait]
impl ResponseMiddleware for RateLimitMiddleware {
    fn name(&self) -> &'static str {
        "rate-limit"
    }

    async fn process(&self, _ctx: &DispatchContext, response: Value) -> ApiResult<Value> {
        self.limiter.enforce(ROUTER_RATE_LIMIT_KEY)?;
        Ok(response)
    }
}

/// Ordered list of stages
#[derive(Clone, Default)]
pub struct MiddlewarePipeline {
    stages: Vec<Arc<dyn ResponseMiddleware>>,
}

impl MiddlewarePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn with<M: ResponseMiddleware + 'static>(mut self, stage: M) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order, stopping at the first failure
    pub async fn run(&self, ctx: &DispatchContext, mut response: Value) -> ApiResult<Value> {
        for stage in &self.stages {
            response = stage.process(ctx, response).await?;
        }
        Ok(response)
    }
}

impl std::fmt::Debug for MiddlewarePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewarePipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
