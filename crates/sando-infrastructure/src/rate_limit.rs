//! Fixed-window rate limiting
//!
//! Counters are keyed by string. The read-increment happens under the
//! DashMap shard lock, so concurrent callers never both take the last slot.

use crate::config::RateLimitPolicy;
use dashmap::DashMap;
use sando_domain::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Rate limit result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in current window
    pub remaining: u32,
    /// Time until the window resets
    pub reset_in: Duration,
    /// Current request count in window
    pub current_count: u32,
    /// Requests allowed per window
    pub limit: u32,
}

#[derive(Debug, Clone, Copy)]
struct WindowState {
    started: Instant,
    count: u32,
}

/// Keyed fixed-window limiter
#[derive(Clone, Debug)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    windows: Arc<DashMap<String, WindowState>>,
}

impl RateLimiter {
    /// Create a limiter for the given policy
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: Arc::new(DashMap::new()),
        }
    }

    /// Active policy
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Whether requests are counted at all
    pub fn is_enabled(&self) -> bool {
        self.policy.enabled
    }

    /// Count one request against `key`
    pub fn check(&self, key: &str) -> RateLimitResult {
        let limit = self.policy.max_requests;
        if !self.policy.enabled {
            return RateLimitResult {
                allowed: true,
                remaining: limit,
                reset_in: Duration::ZERO,
                current_count: 0,
                limit,
            };
        }

        let now = Instant::now();
        let mut entry = self
            .windows
            .entry(key.to_string())
            .or_insert(WindowState {
                started: now,
                count: 0,
            });
        let state = entry.value_mut();

        if now.duration_since(state.started) >= self.policy.window {
            state.started = now;
            state.count = 0;
        }

        let allowed = state.count < limit;
        if allowed {
            state.count += 1;
        }
        let reset_in = self
            .policy
            .window
            .saturating_sub(now.duration_since(state.started));

        RateLimitResult {
            allowed,
            remaining: limit.saturating_sub(state.count),
            reset_in,
            current_count: state.count,
            limit,
        }
    }

    /// Count one request and fail with `RateLimited` when over quota
    pub fn enforce(&self, key: &str) -> ApiResult<RateLimitResult> {
        let result = self.check(key);
        if result.allowed {
            Ok(result)
        } else {
            debug!(
                key = key,
                limit = result.limit,
                reset_in_ms = result.reset_in.as_millis(),
                "Rate limit exceeded"
            );
            Err(ApiError::rate_limited(
                format!(
                    "Rate limit of {} requests exceeded for {key}",
                    result.limit
                ),
                result.reset_in,
            ))
        }
    }

    /// Forget the window for one key
    pub fn reset(&self, key: &str) {
        self.windows.remove(key);
    }

    /// Forget every window
    pub fn reset_all(&self) {
        self.windows.clear();
    }
}
