//! Sando - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sando health` | Probe every service and print the system verdict |
//! | `sando request GET /temples/42` | Send one request through a service client |
//! | `sando endpoints` | List the mock backend routes |

use clap::Parser;
use sando::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}
