//! Configuration loader tests
//!
//! Tests that mutate environment variables are ignored by default:
//!
//! ```bash
//! cargo test -p sando-infrastructure --test unit config_tests -- --test-threads=1 --ignored
//! ```

use sando_infrastructure::config::{
    AppConfig, ClientConfig, ClientSettings, ConfigBuilder, ConfigLoader, Environment,
    MockServerConfig,
};
use sando_infrastructure::constants::*;
use sando_domain::ServiceName;
use std::env;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.client.timeout_ms, CLIENT_DEFAULT_TIMEOUT_MS);
    assert_eq!(config.client.retries, CLIENT_DEFAULT_RETRIES);
    assert!(config.client.cache_enabled);
    assert!(!config.client.rate_limit_enabled);
    assert_eq!(config.client.environment, Environment::Development);
    assert_eq!(config.mock.default_delay_ms, MOCK_DEFAULT_DELAY_MS);
    assert!(config.mock.dev_tokens.contains(&DEV_AUTH_TOKEN.to_string()));
}

#[test]
fn test_load_from_toml_file() {
    let file = write_config(
        r#"
[client]
environment = "staging"
timeout_ms = 2500
rate_limit_enabled = true
rate_limit_max = 3

[client.default_headers]
X-Client = "sando-tests"

[mock]
default_delay_ms = 0
failure_rate = 0.25

[logging]
level = "debug"
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap();

    assert_eq!(config.client.environment, Environment::Staging);
    assert_eq!(config.client.timeout_ms, 2500);
    assert!(config.client.rate_limit_enabled);
    assert_eq!(config.client.rate_limit_max, 3);
    assert_eq!(
        config.client.default_headers.get("X-Client").map(String::as_str),
        Some("sando-tests")
    );
    assert_eq!(config.client.retries, CLIENT_DEFAULT_RETRIES);
    assert_eq!(config.mock.default_delay_ms, 0);
    assert!((config.mock.failure_rate - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load()
        .unwrap();
    assert_eq!(config.client.timeout_ms, CLIENT_DEFAULT_TIMEOUT_MS);
}

#[test]
fn test_invalid_values_are_rejected() {
    let bad_rate = write_config("[mock]\nfailure_rate = 1.5\n");
    assert!(
        ConfigLoader::new()
            .with_config_path(bad_rate.path())
            .load()
            .is_err()
    );

    let bad_timeout = write_config("[client]\ntimeout_ms = 0\n");
    assert!(
        ConfigLoader::new()
            .with_config_path(bad_timeout.path())
            .load()
            .is_err()
    );

    let bad_level = write_config("[logging]\nlevel = \"chatty\"\n");
    assert!(
        ConfigLoader::new()
            .with_config_path(bad_level.path())
            .load()
            .is_err()
    );
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sando.toml");

    let config = ConfigBuilder::new()
        .with_client(ClientSettings {
            base_address: Some("http://example.test/api".to_string()),
            retries: 1,
            ..ClientSettings::default()
        })
        .with_mock(MockServerConfig::instant())
        .build();

    let loader = ConfigLoader::new().with_config_path(&path);
    loader.save_to_file(&config, &path).unwrap();
    let reloaded = loader.reload().unwrap();

    assert_eq!(reloaded.client, config.client);
    assert_eq!(reloaded.mock, config.mock);
    assert_eq!(loader.config_path(), Some(path.as_path()));
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let file = write_config("[client]\ntimeout_ms = 2500\n");
    set_env("SANDOTEST__CLIENT__TIMEOUT_MS", "777");
    set_env("SANDOTEST__MOCK__REQUIRE_AUTH", "true");

    let result = ConfigLoader::new()
        .with_env_prefix("SANDOTEST")
        .with_config_path(file.path())
        .load();

    remove_env("SANDOTEST__CLIENT__TIMEOUT_MS");
    remove_env("SANDOTEST__MOCK__REQUIRE_AUTH");

    let config = result.unwrap();
    assert_eq!(config.client.timeout_ms, 777);
    assert!(config.mock.require_auth);
}

#[test]
fn test_client_config_for_service() {
    let settings = ClientSettings {
        environment: Environment::Production,
        timeout_ms: 1500,
        rate_limit_enabled: true,
        rate_limit_max: 5,
        ..ClientSettings::default()
    };

    let config = ClientConfig::for_service(&settings, ServiceName::Content);
    assert_eq!(config.base_address, format!("{PRODUCTION_BASE_ADDRESS}/content"));
    assert_eq!(config.timeout, Duration::from_millis(1500));
    assert_eq!(config.default_headers.get("x-sando-service"), Some("content"));
    assert_eq!(
        config.default_headers.get("Content-Type"),
        Some("application/json")
    );
    assert!(config.rate_limit.enabled);
    assert_eq!(config.rate_limit.max_requests, 5);
}

#[test]
fn test_explicit_base_address_wins_over_environment() {
    let settings = ClientSettings {
        base_address: Some("http://localhost:9999/".to_string()),
        environment: Environment::Production,
        ..ClientSettings::default()
    };
    let config = ClientConfig::for_service(&settings, ServiceName::Search);
    assert_eq!(config.base_address, "http://localhost:9999/search");
}
