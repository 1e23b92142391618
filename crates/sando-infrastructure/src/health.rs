//! Service health probing
//!
//! Every registered client is probed on its own task. A probe that errors,
//! exceeds its timeout or panics yields an unhealthy entry for that service
//! only.

use crate::logging::log_health_check;
use crate::utils::TimedOperation;
use futures::future::join_all;
use sando_domain::ports::ServiceClient;
use sando_domain::{HealthStatusEntry, ServiceName, SystemHealth};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

struct HealthProbe {
    client: Arc<dyn ServiceClient>,
    timeout: Duration,
}

/// Set of clients to probe together
#[derive(Default)]
pub struct HealthRegistry {
    probes: Vec<HealthProbe>,
}

impl HealthRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client with the upper bound for its probe
    pub fn register(&mut self, client: Arc<dyn ServiceClient>, timeout: Duration) {
        self.probes.push(HealthProbe { client, timeout });
    }

    /// Builder-style register
    pub fn with(mut self, client: Arc<dyn ServiceClient>, timeout: Duration) -> Self {
        self.register(client, timeout);
        self
    }

    /// Registered services
    pub fn services(&self) -> Vec<ServiceName> {
        self.probes.iter().map(|p| p.client.service()).collect()
    }

    /// Probe every registered service concurrently
    pub async fn check_all(&self) -> BTreeMap<ServiceName, HealthStatusEntry> {
        let probes = self.probes.iter().map(|probe| {
            let client = Arc::clone(&probe.client);
            let timeout = probe.timeout;
            let service = client.service();
            let timer = TimedOperation::start();
            let handle = tokio::spawn(async move {
                tokio::time::timeout(timeout, client.health_check()).await
            });
            async move {
                let error = match handle.await {
                    Ok(Ok(Ok(_))) => None,
                    Ok(Ok(Err(err))) => Some(err.to_string()),
                    Ok(Err(_elapsed)) => Some(format!(
                        "Health check timed out after {}ms",
                        timeout.as_millis()
                    )),
                    Err(join_err) if join_err.is_panic() => {
                        Some("Health check panicked".to_string())
                    }
                    Err(_) => Some("Health check was cancelled".to_string()),
                };
                let elapsed = timer.elapsed();
                log_health_check(service.as_str(), error.is_none(), elapsed, error.as_deref());
                let entry = match error {
                    None => HealthStatusEntry::healthy(service),
                    Some(error) => HealthStatusEntry::failed(service, error),
                };
                (service, entry.with_response_time(elapsed))
            }
        });

        join_all(probes).await.into_iter().collect()
    }

    /// Probe every service and aggregate the verdict
    pub async fn system_health(&self) -> SystemHealth {
        SystemHealth::from_services(self.check_all().await)
    }
}
