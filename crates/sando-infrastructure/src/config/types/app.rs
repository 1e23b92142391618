//! Main application configuration

use super::{ClientSettings, LoggingConfig, MockServerConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// ```toml
/// [client]
/// environment = "development"
/// timeout_ms = 5000
/// cache_enabled = true
///
/// [mock]
/// default_delay_ms = 0
/// failure_rate = 0.05
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Shared client settings
    pub client: ClientSettings,
    /// Mock router behaviour
    pub mock: MockServerConfig,
    /// Logging
    pub logging: LoggingConfig,
}
