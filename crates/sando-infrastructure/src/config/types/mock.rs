//! Mock router configuration types

use super::client::RateLimitPolicy;
use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Behaviour of the in-process mock router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockServerConfig {
    /// Simulated latency applied when an endpoint has no override
    pub default_delay_ms: u64,
    /// Probability in `[0, 1]` of replacing a success with a network error
    pub failure_rate: f64,
    /// Require a valid bearer token on every endpoint
    pub require_auth: bool,
    /// Enable the router-wide rate limit
    pub rate_limit_enabled: bool,
    /// Requests allowed per window across the whole router
    pub rate_limit_max: u32,
    /// Router-wide window in milliseconds
    pub rate_limit_window_ms: u64,
    /// Tokens the auth store accepts from the start
    pub dev_tokens: Vec<String>,
}

impl Default for MockServerConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: MOCK_DEFAULT_DELAY_MS,
            failure_rate: 0.0,
            require_auth: false,
            rate_limit_enabled: false,
            rate_limit_max: RATE_LIMIT_DEFAULT_MAX_REQUESTS,
            rate_limit_window_ms: RATE_LIMIT_DEFAULT_WINDOW_MS,
            dev_tokens: vec![DEV_AUTH_TOKEN.to_string()],
        }
    }
}

impl MockServerConfig {
    /// Instant, failure-free configuration for tests
    pub fn instant() -> Self {
        Self {
            default_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Default simulated latency
    pub fn default_delay(&self) -> Duration {
        Duration::from_millis(self.default_delay_ms)
    }

    /// Router-wide rate limit policy
    pub fn rate_limit(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            enabled: self.rate_limit_enabled,
            max_requests: self.rate_limit_max,
            window: Duration::from_millis(self.rate_limit_window_ms),
        }
    }
}
