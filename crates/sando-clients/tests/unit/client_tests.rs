//! ApiClient behaviour against scripted transports

use async_trait::async_trait;
use sando_clients::ApiClient;
use sando_domain::ports::{ServiceClient, Transport};
use sando_domain::{ApiError, ApiRequest, ApiResult, ErrorCode, HttpMethod, ServiceName};
use sando_infrastructure::config::{ClientConfig, ClientSettings};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport that fails a fixed number of times, then echoes the request
struct ScriptedTransport {
    calls: AtomicUsize,
    failures: usize,
    failure: ApiError,
    delay: Duration,
    last_request: Mutex<Option<ApiRequest>>,
}

impl ScriptedTransport {
    fn ok() -> Self {
        Self::failing(0, ApiError::network("unused"))
    }

    fn failing(failures: usize, failure: ApiError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failures,
            failure,
            delay: Duration::ZERO,
            last_request: Mutex::new(None),
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::ok()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> ApiRequest {
        self.last_request.lock().unwrap().clone().unwrap()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn dispatch(&self, request: ApiRequest) -> ApiResult<Value> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if call < self.failures {
            return Err(self.failure.clone());
        }
        Ok(json!({ "url": request.url, "call": call }))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn fast_settings() -> ClientSettings {
    ClientSettings {
        timeout_ms: 500,
        retries: 3,
        retry_delay_ms: 1,
        ..ClientSettings::default()
    }
}

fn client_with(settings: &ClientSettings, transport: &Arc<ScriptedTransport>) -> ApiClient {
    let transport: Arc<dyn Transport> = Arc::clone(transport) as Arc<dyn Transport>;
    ApiClient::new(
        ClientConfig::for_service(settings, ServiceName::Content),
        transport,
    )
}

#[tokio::test]
async fn test_get_is_served_from_cache() {
    let transport = Arc::new(ScriptedTransport::ok());
    let client = client_with(&fast_settings(), &transport);

    let first = client.get("/temples?b=2&a=1").await.unwrap();
    let second = client.get("/temples?a=1&b=2").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.calls(), 1);
    let stats = client.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[tokio::test]
async fn test_non_get_is_never_cached() {
    let transport = Arc::new(ScriptedTransport::ok());
    let client = client_with(&fast_settings(), &transport);

    client.post("/analytics/events", json!({})).await.unwrap();
    client.post("/analytics/events", json!({})).await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_disabled_cache_always_dispatches() {
    let transport = Arc::new(ScriptedTransport::ok());
    let settings = ClientSettings {
        cache_enabled: false,
        ..fast_settings()
    };
    let client = client_with(&settings, &transport);

    client.get("/temples").await.unwrap();
    client.get("/temples").await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_clear_cache_forces_dispatch() {
    let transport = Arc::new(ScriptedTransport::ok());
    let client = client_with(&fast_settings(), &transport);

    client.get("/temples").await.unwrap();
    client.clear_cache();
    client.get("/temples").await.unwrap();
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_token_change_drops_cached_responses() {
    let transport = Arc::new(ScriptedTransport::ok());
    let client = client_with(&fast_settings(), &transport);

    client.set_auth_token("first");
    client.get("/temples").await.unwrap();
    client.set_auth_token("first");
    client.get("/temples").await.unwrap();
    assert_eq!(transport.calls(), 1);

    client.set_auth_token("second");
    client.get("/temples").await.unwrap();
    assert_eq!(transport.calls(), 2);

    client.clear_auth_token();
    client.get("/temples").await.unwrap();
    assert_eq!(transport.calls(), 3);
    assert!(transport.last_request().headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_network_errors_are_retried() {
    let transport = Arc::new(ScriptedTransport::failing(2, ApiError::network("flaky")));
    let client = client_with(&fast_settings(), &transport);

    let response = client.get("/temples").await.unwrap();
    assert_eq!(response["call"], 2);
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let transport = Arc::new(ScriptedTransport::failing(usize::MAX, ApiError::network("down")));
    let settings = ClientSettings {
        retries: 2,
        ..fast_settings()
    };
    let client = client_with(&settings, &transport);

    let err = client.get("/temples").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    for failure in [
        ApiError::unauthorized("no"),
        ApiError::not_found("gone"),
        ApiError::validation("bad"),
        ApiError::rate_limited("slow down", Duration::from_secs(1)),
    ] {
        let code = failure.code;
        let transport = Arc::new(ScriptedTransport::failing(1, failure));
        let client = client_with(&fast_settings(), &transport);

        let err = client.get("/temples").await.unwrap_err();
        assert_eq!(err.code, code);
        assert_eq!(transport.calls(), 1);
    }
}

#[tokio::test]
async fn test_slow_transport_times_out_as_network_error() {
    let transport = Arc::new(ScriptedTransport::slow(Duration::from_millis(300)));
    let settings = ClientSettings {
        timeout_ms: 20,
        retries: 1,
        ..fast_settings()
    };
    let client = client_with(&settings, &transport);

    let err = client.get("/temples").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NetworkError);
    assert!(err.message.contains("timed out"));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_client_rate_limit_counts_every_call() {
    let transport = Arc::new(ScriptedTransport::ok());
    let settings = ClientSettings {
        rate_limit_enabled: true,
        rate_limit_max: 3,
        rate_limit_window_ms: 60_000,
        ..fast_settings()
    };
    let client = client_with(&settings, &transport);

    let mut ok = 0;
    let mut limited = 0;
    for _ in 0..4 {
        match client.get("/temples").await {
            Ok(_) => ok += 1,
            Err(err) if err.code == ErrorCode::RateLimited => limited += 1,
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
    assert_eq!((ok, limited), (3, 1));
    assert_eq!(transport.calls(), 1);

    client.reset_rate_limit();
    assert!(client.get("/temples").await.is_ok());
}

#[tokio::test]
async fn test_headers_carry_defaults_and_token() {
    let transport = Arc::new(ScriptedTransport::ok());
    let mut settings = fast_settings();
    settings
        .default_headers
        .insert("X-Locale".to_string(), "ja-JP".to_string());
    let client = client_with(&settings, &transport);

    client.post("/x", json!({})).await.unwrap();
    let request = transport.last_request();
    assert_eq!(request.headers.get("x-locale"), Some("ja-JP"));
    assert_eq!(request.headers.get("x-sando-service"), Some("content"));
    assert!(request.headers.get("authorization").is_none());

    client.set_auth_token("secret");
    assert!(client.is_authenticated());
    client.post("/x", json!({})).await.unwrap();
    assert_eq!(
        transport.last_request().headers.get("Authorization"),
        Some("Bearer secret")
    );

    client.clear_auth_token();
    assert!(!client.is_authenticated());
    assert_eq!(client.auth_token(), None);
}

#[tokio::test]
async fn test_health_check_bypasses_cache_and_rate_limit() {
    let transport = Arc::new(ScriptedTransport::ok());
    let settings = ClientSettings {
        rate_limit_enabled: true,
        rate_limit_max: 1,
        ..fast_settings()
    };
    let client = client_with(&settings, &transport);

    for _ in 0..3 {
        client.health_check().await.unwrap();
    }
    assert_eq!(transport.calls(), 3);
    assert_eq!(transport.last_request().url, "/health/content");
    assert_eq!(transport.last_request().method, HttpMethod::Get);
}

#[tokio::test]
async fn test_update_config_resets_state() {
    let transport = Arc::new(ScriptedTransport::ok());
    let client = client_with(&fast_settings(), &transport);
    client.get("/temples").await.unwrap();

    let mut config = client.config();
    config.timeout = Duration::from_millis(1234);
    client.update_config(config);

    assert_eq!(client.config().timeout, Duration::from_millis(1234));
    assert_eq!(client.cache_stats().hits, 0);
    client.get("/temples").await.unwrap();
    assert_eq!(transport.calls(), 2);
}
