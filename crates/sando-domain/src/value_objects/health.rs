//! Health value objects
//!
//! Entries are produced fresh by every health check; the system verdict is
//! derived from them and never stored.

use super::ServiceName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Result of probing a single service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatusEntry {
    /// Service that was probed
    pub service: ServiceName,
    /// Whether the probe succeeded
    pub healthy: bool,
    /// When the probe finished
    pub last_check: DateTime<Utc>,
    /// Probe duration in milliseconds, when the probe reported one
    pub response_time_ms: Option<u64>,
    /// Failure description for unhealthy services
    pub error: Option<String>,
}

impl HealthStatusEntry {
    /// Create a healthy entry
    pub fn healthy(service: ServiceName) -> Self {
        Self {
            service,
            healthy: true,
            last_check: Utc::now(),
            response_time_ms: None,
            error: None,
        }
    }

    /// Create an unhealthy entry
    pub fn failed<S: Into<String>>(service: ServiceName, error: S) -> Self {
        Self {
            service,
            healthy: false,
            last_check: Utc::now(),
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    /// Set response time
    pub fn with_response_time(mut self, duration: Duration) -> Self {
        self.response_time_ms = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }
}

/// Three-way system verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemHealthStatus {
    /// Every service is healthy
    Healthy,
    /// At least half, but not all, services are healthy
    Degraded,
    /// Fewer than half of the services are healthy
    Unhealthy,
}

impl SystemHealthStatus {
    /// Derive the verdict from a set of entries
    ///
    /// An empty set counts as healthy.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a HealthStatusEntry>,
    {
        let (total, healthy) = entries.into_iter().fold((0usize, 0usize), |(t, h), e| {
            (t + 1, h + usize::from(e.healthy))
        });
        Self::from_counts(total, healthy)
    }

    /// Derive the verdict from counts
    pub fn from_counts(total: usize, healthy: usize) -> Self {
        if healthy == total {
            Self::Healthy
        } else if healthy * 2 < total {
            Self::Unhealthy
        } else {
            Self::Degraded
        }
    }

    /// Whether the system can still serve traffic
    pub fn is_operational(&self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded)
    }
}

/// Totals over one health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Number of services probed
    pub total: usize,
    /// Number of healthy services
    pub healthy: usize,
    /// Number of unhealthy services
    pub unhealthy: usize,
    /// Mean response time over services that reported one
    pub average_response_time_ms: Option<f64>,
}

impl HealthSummary {
    /// Compute totals over a set of entries
    #[allow(clippy::cast_precision_loss)]
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a HealthStatusEntry>,
    {
        let mut total = 0usize;
        let mut healthy = 0usize;
        let mut timed = 0u32;
        let mut time_sum = 0f64;
        for entry in entries {
            total += 1;
            if entry.healthy {
                healthy += 1;
            }
            if let Some(ms) = entry.response_time_ms {
                timed += 1;
                time_sum += ms as f64;
            }
        }
        Self {
            total,
            healthy,
            unhealthy: total - healthy,
            average_response_time_ms: (timed > 0).then(|| time_sum / f64::from(timed)),
        }
    }
}

/// Aggregated system health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    /// Overall verdict
    pub status: SystemHealthStatus,
    /// Per-service entries
    pub services: BTreeMap<ServiceName, HealthStatusEntry>,
    /// Totals and average response time
    pub summary: HealthSummary,
}

impl SystemHealth {
    /// Aggregate a set of per-service entries
    pub fn from_services(services: BTreeMap<ServiceName, HealthStatusEntry>) -> Self {
        Self {
            status: SystemHealthStatus::from_entries(services.values()),
            summary: HealthSummary::from_entries(services.values()),
            services,
        }
    }
}
