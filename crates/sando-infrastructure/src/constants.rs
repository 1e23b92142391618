//! Infrastructure layer constants
//!
//! Contains defaults used by configuration, logging, caching and the mock
//! router. Protocol-level names are defined in `sando_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "sando.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "sando";

/// Environment variable prefix for configuration (nested keys use `__`)
pub const CONFIG_ENV_PREFIX: &str = "SANDO";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CLIENT CONSTANTS
// ============================================================================

/// Base address used in development when none is configured
pub const DEV_BASE_ADDRESS: &str = "http://localhost:3000/api";

/// Base address used in staging when none is configured
pub const STAGING_BASE_ADDRESS: &str = "https://staging.sando.dev/api";

/// Base address used in production when none is configured
pub const PRODUCTION_BASE_ADDRESS: &str = "https://api.sando.dev";

/// Default per-attempt request timeout in milliseconds
pub const CLIENT_DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default number of retries for transport failures
pub const CLIENT_DEFAULT_RETRIES: u32 = 3;

/// Default base delay between retries in milliseconds
pub const CLIENT_DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Upper bound on a single retry delay in milliseconds
pub const CLIENT_MAX_RETRY_DELAY_MS: u64 = 30_000;

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default response cache TTL in seconds (5 minutes)
pub const CACHE_DEFAULT_TTL_SECS: u64 = 300;

/// Default maximum number of cached responses per client
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 100;

// ============================================================================
// RATE LIMITING CONSTANTS
// ============================================================================

/// Default maximum requests per window
pub const RATE_LIMIT_DEFAULT_MAX_REQUESTS: u32 = 100;

/// Default rate limit window in milliseconds (1 minute)
pub const RATE_LIMIT_DEFAULT_WINDOW_MS: u64 = 60_000;

/// Counter key used by the router-wide limiter
pub const ROUTER_RATE_LIMIT_KEY: &str = "router";

// ============================================================================
// MOCK ROUTER CONSTANTS
// ============================================================================

/// Default simulated latency in milliseconds
pub const MOCK_DEFAULT_DELAY_MS: u64 = 200;

/// Development token every fresh token store accepts
pub const DEV_AUTH_TOKEN: &str = "dev-token-sando";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "SANDO_LOG";

/// Default log file name stem
pub const LOG_FILE_STEM: &str = "sando";
