//! Service client factory
//!
//! Owns one [`ApiClient`] per [`ServiceName`], all sharing one transport.
//! Authentication state is applied to every client at once and remembered
//! so a rebuild keeps the session.

use crate::client::ApiClient;
use crate::mock::mock_router;
use crate::services::{AdminClient, AnalyticsClient, CommunityClient, ContentClient, SearchClient};
use arc_swap::ArcSwap;
use sando_domain::ports::{ServiceClient, Transport};
use sando_domain::{ApiError, ApiResult, HealthStatusEntry, ServiceName, SystemHealth};
use sando_infrastructure::HealthRegistry;
use sando_infrastructure::config::{AppConfig, ClientConfig, ClientSettings};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// The full set of clients, one per service
#[derive(Debug)]
pub struct ClientSet {
    content: Arc<ApiClient>,
    community: Arc<ApiClient>,
    analytics: Arc<ApiClient>,
    admin: Arc<ApiClient>,
    search: Arc<ApiClient>,
}

impl ClientSet {
    fn build(settings: &ClientSettings, transport: &Arc<dyn Transport>) -> Self {
        let make = |service| {
            Arc::new(ApiClient::new(
                ClientConfig::for_service(settings, service),
                Arc::clone(transport),
            ))
        };
        Self {
            content: make(ServiceName::Content),
            community: make(ServiceName::Community),
            analytics: make(ServiceName::Analytics),
            admin: make(ServiceName::Admin),
            search: make(ServiceName::Search),
        }
    }

    /// Client for one service
    pub fn get(&self, service: ServiceName) -> &Arc<ApiClient> {
        match service {
            ServiceName::Content => &self.content,
            ServiceName::Community => &self.community,
            ServiceName::Analytics => &self.analytics,
            ServiceName::Admin => &self.admin,
            ServiceName::Search => &self.search,
        }
    }

    /// Every client in service order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ApiClient>> {
        ServiceName::ALL.into_iter().map(|service| self.get(service))
    }
}

/// Factory managing the per-service clients
pub struct ServiceClientFactory {
    transport: Arc<dyn Transport>,
    settings: ArcSwap<ClientSettings>,
    clients: ArcSwap<ClientSet>,
    /// Remembered session token; also serializes auth changes and rebuilds
    auth_token: Mutex<Option<String>>,
}

impl ServiceClientFactory {
    /// Build every client over the given transport
    pub fn new(settings: ClientSettings, transport: Arc<dyn Transport>) -> Self {
        let clients = ClientSet::build(&settings, &transport);
        info!(
            transport = transport.name(),
            base_address = %settings.resolved_base_address(),
            environment = %settings.environment,
            "Service clients initialized"
        );
        Self {
            transport,
            settings: ArcSwap::from_pointee(settings),
            clients: ArcSwap::from_pointee(clients),
            auth_token: Mutex::new(None),
        }
    }

    /// Build every client over the seeded mock backend
    pub fn with_mock_backend(config: &AppConfig) -> Self {
        let router: Arc<dyn Transport> = Arc::new(mock_router(config.mock.clone()));
        Self::new(config.client.clone(), router)
    }

    /// Current client set
    pub fn get_clients(&self) -> Arc<ClientSet> {
        self.clients.load_full()
    }

    /// Client for one service
    pub fn get_client(&self, service: ServiceName) -> Arc<ApiClient> {
        Arc::clone(self.clients.load().get(service))
    }

    /// Client for a service given by name
    pub fn get_client_by_name(&self, name: &str) -> ApiResult<Arc<ApiClient>> {
        let service: ServiceName = name.parse()?;
        Ok(self.get_client(service))
    }

    pub fn content(&self) -> ContentClient {
        ContentClient::new(self.get_client(ServiceName::Content))
    }

    pub fn community(&self) -> CommunityClient {
        CommunityClient::new(self.get_client(ServiceName::Community))
    }

    pub fn analytics(&self) -> AnalyticsClient {
        AnalyticsClient::new(self.get_client(ServiceName::Analytics))
    }

    pub fn admin(&self) -> AdminClient {
        AdminClient::new(self.get_client(ServiceName::Admin))
    }

    pub fn search(&self) -> SearchClient {
        SearchClient::new(self.get_client(ServiceName::Search))
    }

    /// Shared transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Active settings
    pub fn settings(&self) -> ClientSettings {
        ClientSettings::clone(&self.settings.load())
    }

    /// Apply a bearer token to every client
    pub fn set_auth_token(&self, token: &str) {
        let mut guard = self.auth_token.lock().unwrap_or_else(PoisonError::into_inner);
        for client in self.clients.load().iter() {
            client.set_auth_token(token);
        }
        *guard = Some(token.to_string());
        debug!("Auth token applied to all clients");
    }

    /// Remove the bearer token from every client
    pub fn clear_auth_token(&self) {
        let mut guard = self.auth_token.lock().unwrap_or_else(PoisonError::into_inner);
        for client in self.clients.load().iter() {
            client.clear_auth_token();
        }
        *guard = None;
        debug!("Auth token cleared from all clients");
    }

    /// Whether a session token is applied
    pub fn is_authenticated(&self) -> bool {
        self.auth_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Log in through the community service and apply the issued token
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let response = self.community().login(username, password).await?;
        let token = response
            .get("token")
            .and_then(|t| t.as_str())
            .ok_or_else(|| ApiError::internal("Login response carried no token"))?
            .to_string();
        self.set_auth_token(&token);
        info!(username, "Logged in");
        Ok(token)
    }

    /// End the session server-side and clear the token locally
    ///
    /// The local token is cleared even when the server call fails.
    pub async fn logout(&self) -> ApiResult<()> {
        let token = self
            .auth_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let Some(token) = token else {
            return Ok(());
        };
        let result = self.community().logout(&token).await;
        self.clear_auth_token();
        result.map(|_| ())
    }

    /// Probe every service concurrently
    pub async fn check_health(&self) -> BTreeMap<ServiceName, HealthStatusEntry> {
        self.health_registry().check_all().await
    }

    /// Probe every service and aggregate the verdict
    pub async fn get_system_health(&self) -> SystemHealth {
        self.health_registry().system_health().await
    }

    fn health_registry(&self) -> HealthRegistry {
        let clients = self.clients.load();
        clients.iter().fold(HealthRegistry::new(), |registry, client| {
            let timeout = client.config().timeout;
            registry.with(Arc::clone(client) as Arc<dyn ServiceClient>, timeout)
        })
    }

    /// Drop every client's cached responses
    pub fn clear_all_caches(&self) {
        for client in self.clients.load().iter() {
            client.clear_cache();
        }
    }

    /// Start fresh rate limit windows on every client and the transport
    pub fn reset_all_rate_limits(&self) {
        for client in self.clients.load().iter() {
            client.reset_rate_limit();
        }
        self.transport.reset_rate_limits();
    }

    /// Rebuild every client, optionally with new settings
    ///
    /// A remembered session token is re-applied to the new clients.
    pub fn reinitialize(&self, settings: Option<ClientSettings>) {
        let guard = self.auth_token.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(settings) = settings {
            self.settings.store(Arc::new(settings));
        }
        let clients = ClientSet::build(&self.settings.load(), &self.transport);
        if let Some(token) = guard.as_deref() {
            for client in clients.iter() {
                client.set_auth_token(token);
            }
        }
        self.clients.store(Arc::new(clients));
        info!(authenticated = guard.is_some(), "Service clients reinitialized");
    }
}

impl std::fmt::Debug for ServiceClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceClientFactory")
            .field("transport", &self.transport.name())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
