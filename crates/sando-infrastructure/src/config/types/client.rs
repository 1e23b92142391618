//! Client configuration types
//!
//! [`ClientSettings`] is the flat, environment-sourced configuration
//! surface. [`ClientConfig`] is the per-service structure a client is built
//! with, derived from the settings and the service name.

use crate::constants::*;
use sando_domain::constants::SERVICE_HEADER;
use sando_domain::{Headers, ServiceName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Deployment environment tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Base address used when none is configured
    pub fn default_base_address(&self) -> &'static str {
        match self {
            Self::Development | Self::Test => DEV_BASE_ADDRESS,
            Self::Staging => STAGING_BASE_ADDRESS,
            Self::Production => PRODUCTION_BASE_ADDRESS,
        }
    }

    /// Lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared client settings, one set for every service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Root address; falls back to the environment default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_address: Option<String>,
    /// Deployment environment tag
    pub environment: Environment,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after a transport failure
    pub retries: u32,
    /// Base retry backoff in milliseconds
    pub retry_delay_ms: u64,
    /// Enable the read-through response cache
    pub cache_enabled: bool,
    /// Cached response lifetime in seconds
    pub cache_ttl_secs: u64,
    /// Maximum cached responses per client
    pub cache_max_size: u64,
    /// Enable the per-client rate limit
    pub rate_limit_enabled: bool,
    /// Requests allowed per window
    pub rate_limit_max: u32,
    /// Rate limit window in milliseconds
    pub rate_limit_window_ms: u64,
    /// Headers sent with every request
    pub default_headers: BTreeMap<String, String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_address: None,
            environment: Environment::default(),
            timeout_ms: CLIENT_DEFAULT_TIMEOUT_MS,
            retries: CLIENT_DEFAULT_RETRIES,
            retry_delay_ms: CLIENT_DEFAULT_RETRY_DELAY_MS,
            cache_enabled: true,
            cache_ttl_secs: CACHE_DEFAULT_TTL_SECS,
            cache_max_size: CACHE_DEFAULT_MAX_ENTRIES,
            rate_limit_enabled: false,
            rate_limit_max: RATE_LIMIT_DEFAULT_MAX_REQUESTS,
            rate_limit_window_ms: RATE_LIMIT_DEFAULT_WINDOW_MS,
            default_headers: BTreeMap::new(),
        }
    }
}

impl ClientSettings {
    /// Effective root address
    pub fn resolved_base_address(&self) -> String {
        self.base_address
            .clone()
            .unwrap_or_else(|| self.environment.default_base_address().to_string())
    }
}

/// Read-through cache policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Whether responses are cached
    pub enabled: bool,
    /// Lifetime of a cached response
    pub ttl: Duration,
    /// Maximum number of cached responses
    pub max_entries: u64,
}

impl CachePolicy {
    /// Policy that never caches
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl: Duration::ZERO,
            max_entries: 0,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(CACHE_DEFAULT_TTL_SECS),
            max_entries: CACHE_DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Fixed-window rate limit policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Whether requests are counted
    pub enabled: bool,
    /// Requests allowed per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitPolicy {
    /// Policy that admits everything
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_requests: RATE_LIMIT_DEFAULT_MAX_REQUESTS,
            window: Duration::from_millis(RATE_LIMIT_DEFAULT_WINDOW_MS),
        }
    }

    /// Enabled policy with the given quota
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            enabled: true,
            max_requests,
            window,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Configuration a single client is built with
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service this client talks to
    pub service: ServiceName,
    /// Service base address
    pub base_address: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Retries after a transport failure
    pub retries: u32,
    /// Base retry backoff
    pub retry_delay: Duration,
    /// Headers sent with every request
    pub default_headers: Headers,
    /// Response cache policy
    pub cache: CachePolicy,
    /// Client-side rate limit policy
    pub rate_limit: RateLimitPolicy,
}

impl ClientConfig {
    /// Derive the configuration for one service from shared settings
    ///
    /// Never fails; missing values are covered by the settings defaults.
    pub fn for_service(settings: &ClientSettings, service: ServiceName) -> Self {
        let base = settings.resolved_base_address();
        let mut default_headers: Headers = settings
            .default_headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        if default_headers.get("content-type").is_none() {
            default_headers.insert("content-type", "application/json");
        }
        default_headers.insert(SERVICE_HEADER, service.as_str());

        Self {
            service,
            base_address: format!("{}/{}", base.trim_end_matches('/'), service),
            timeout: Duration::from_millis(settings.timeout_ms),
            retries: settings.retries,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
            default_headers,
            cache: CachePolicy {
                enabled: settings.cache_enabled,
                ttl: Duration::from_secs(settings.cache_ttl_secs),
                max_entries: settings.cache_max_size,
            },
            rate_limit: RateLimitPolicy {
                enabled: settings.rate_limit_enabled,
                max_requests: settings.rate_limit_max,
                window: Duration::from_millis(settings.rate_limit_window_ms),
            },
        }
    }
}
