//! Calcmon CLI
//!
//! Command-line interface for the Calcmon monitoring service.
//!
//! # Usage
//!
//! ```bash
//! calcmon --help
//! calcmon health
//! calcmon collect
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// Calcmon CLI - monitoring service command-line interface
#[derive(Parser)]
#[command(name = "calcmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "CALCMON_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health and collector status
    Health,
    /// Trigger one aggregation pass and wait for it to finish
    Collect,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Health) => {
            let body: serde_json::Value = reqwest::get(format!("{}/health", cli.api_url))
                .await
                .context("Failed to reach API server")?
                .json()
                .await
                .context("Health response was not valid JSON")?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Some(Commands::Collect) => {
            let client = reqwest::Client::new();
            let response = client
                .post(format!("{}/collect-now", cli.api_url))
                .send()
                .await
                .context("Failed to reach API server")?;

            let status = response.status();
            let body: serde_json::Value = response
                .json()
                .await
                .context("Trigger response was not valid JSON")?;

            println!("{}", serde_json::to_string_pretty(&body)?);
            if !status.is_success() {
                anyhow::bail!("Collection pass failed (HTTP {status})");
            }
        }
        None => {
            println!("Calcmon CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
