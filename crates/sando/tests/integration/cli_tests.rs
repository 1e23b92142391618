//! CLI command tests

use clap::Parser;
use sando::ErrorCode;
use sando::cli::{Cli, Command, execute};
use sando::infrastructure::config::{AppConfig, MockServerConfig};

fn instant_config() -> AppConfig {
    AppConfig {
        mock: MockServerConfig::instant(),
        ..AppConfig::default()
    }
}

fn request(method: &str, url: &str, service: &str) -> Command {
    Command::Request {
        method: method.to_string(),
        url: url.to_string(),
        service: service.to_string(),
        body: None,
        token: None,
    }
}

#[test]
fn test_parse_request_command() {
    let cli = Cli::try_parse_from([
        "sando",
        "--config",
        "sando.toml",
        "request",
        "POST",
        "/auth/login",
        "--service",
        "community",
        "--body",
        r#"{"username":"aiko","password":"pw"}"#,
    ])
    .unwrap();

    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("sando.toml"))
    );
    match cli.command {
        Command::Request {
            method,
            url,
            service,
            body,
            token,
        } => {
            assert_eq!(method, "POST");
            assert_eq!(url, "/auth/login");
            assert_eq!(service, "community");
            assert!(body.is_some());
            assert!(token.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["sando"]).is_err());
}

#[tokio::test]
async fn test_request_command_returns_response() {
    let output = execute(request("GET", "/temples/42", "content"), &instant_config())
        .await
        .unwrap();
    assert_eq!(output["id"], "42");
}

#[tokio::test]
async fn test_request_command_with_token_and_body() {
    let command = Command::Request {
        method: "post".to_string(),
        url: "/admin/tokens/revoke".to_string(),
        service: "admin".to_string(),
        body: Some(r#"{"token":"unknown"}"#.to_string()),
        token: Some("dev-token-sando".to_string()),
    };
    let output = execute(command, &instant_config()).await.unwrap();
    assert_eq!(output["revoked"], false);
}

#[tokio::test]
async fn test_request_command_errors() {
    let config = instant_config();

    let bad_method = execute(request("TRACE", "/temples", "content"), &config)
        .await
        .unwrap_err();
    assert_eq!(bad_method.api_code(), Some(ErrorCode::ValidationError));

    let bad_service = execute(request("GET", "/temples", "billing"), &config)
        .await
        .unwrap_err();
    assert_eq!(bad_service.api_code(), Some(ErrorCode::NotFound));

    let unauthorized = execute(request("GET", "/admin/stats", "admin"), &config)
        .await
        .unwrap_err();
    assert_eq!(unauthorized.api_code(), Some(ErrorCode::Unauthorized));

    let bad_body = Command::Request {
        method: "POST".to_string(),
        url: "/analytics/events".to_string(),
        service: "analytics".to_string(),
        body: Some("{not json".to_string()),
        token: None,
    };
    let err = execute(bad_body, &config).await.unwrap_err();
    assert!(err.api_code().is_none());
}

#[tokio::test]
async fn test_health_command() {
    let output = execute(Command::Health, &instant_config()).await.unwrap();
    assert_eq!(output["status"], "healthy");
    assert_eq!(output["summary"]["total"], 5);
    assert!(output["services"]["search"]["healthy"].as_bool().unwrap());
}

#[tokio::test]
async fn test_endpoints_command() {
    let output = execute(Command::Endpoints, &instant_config()).await.unwrap();
    let endpoints = output.as_array().unwrap();
    assert!(endpoints.iter().any(|e| e["template"] == "/search"));
    assert!(
        endpoints
            .iter()
            .any(|e| e["template"] == "/admin/stats" && e["require_auth"] == true)
    );
}
