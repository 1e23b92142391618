//! Command line interface
//!
//! Every command runs against the seeded mock backend and prints JSON to
//! stdout. Logs go to stderr.

use clap::{Parser, Subcommand};
use sando_clients::ServiceClientFactory;
use sando_clients::mock::mock_router;
use sando_domain::{Error, HttpMethod, Result, ServiceName};
use sando_infrastructure::config::{AppConfig, ConfigLoader};
use sando_infrastructure::logging::init_logging;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Command line interface for Sando
#[derive(Parser, Debug)]
#[command(name = "sando")]
#[command(about = "Sando - service clients over a mock request router")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe every service and print the aggregated health
    Health,

    /// Send one request through a service client
    Request {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,

        /// Path with optional query string, e.g. `/temples/42?lang=ja`
        url: String,

        /// Service whose client sends the request
        #[arg(short, long, default_value = "content")]
        service: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,

        /// Bearer token applied to every client
        #[arg(short, long)]
        token: Option<String>,
    },

    /// List the mock backend routes
    Endpoints,
}

/// Load configuration, install logging and run one command
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let output = execute(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Run one command and return its JSON output
pub async fn execute(command: Command, config: &AppConfig) -> Result<Value> {
    match command {
        Command::Health => {
            let factory = ServiceClientFactory::with_mock_backend(config);
            let health = factory.get_system_health().await;
            Ok(serde_json::to_value(health)?)
        }
        Command::Request {
            method,
            url,
            service,
            body,
            token,
        } => {
            let method: HttpMethod = method.parse()?;
            let service: ServiceName = service.parse()?;
            let body = body
                .as_deref()
                .map(serde_json::from_str::<Value>)
                .transpose()?;

            let factory = ServiceClientFactory::with_mock_backend(config);
            if let Some(token) = token {
                factory.set_auth_token(&token);
            }
            debug!(%method, %url, %service, "Sending request");
            let client = factory.get_client(service);
            client
                .request(method, &url, body)
                .await
                .map_err(Error::from)
        }
        Command::Endpoints => {
            let router = mock_router(config.mock.clone());
            Ok(serde_json::to_value(router.endpoints())?)
        }
    }
}

