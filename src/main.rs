//! Main entry point for the MT management CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mt_api_client::cli::commands::{self, Commands};
use mt_api_client::{ClientConfig, MachineTranslationClient};

/// Manage machine translation engines
#[derive(Parser, Debug)]
#[command(name = "mt-client", version, about, long_about = None)]
struct Args {
    /// API token (optional, defaults to MT_API_TOKEN env var)
    #[arg(long)]
    token: Option<String>,

    /// Organization (optional, defaults to MT_API_ORGANIZATION env var)
    #[arg(long)]
    organization: Option<String>,

    /// API base URL override
    #[arg(long)]
    base_url: Option<String>,

    /// JSON config file used instead of environment variables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("mt_api_client={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = args.command else {
        println!("Please specify a command. Use --help for more information.");
        return Ok(());
    };

    // Override config with CLI args if provided
    if let Some(token) = &args.token {
        std::env::set_var("MT_API_TOKEN", token);
    }

    let mut config = match args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };

    if let Some(token) = args.token {
        config.token = token;
    }
    if let Some(organization) = args.organization {
        config.organization = Some(organization);
    }
    if let Some(base_url) = args.base_url {
        config.base_url = Some(base_url);
    }

    let client = MachineTranslationClient::new(config)?;
    commands::run(&client, command).await
}
