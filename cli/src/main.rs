mod seed;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_box_server::api::health::ping::PingResponse;

#[derive(Parser)]
#[command(name = "recipe-box")]
#[command(about = "recipe-box CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the recipes table if missing and add sample recipes to an empty table
    InitDb {
        /// PostgreSQL connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
    /// Ping a running server
    Ping {
        /// Server URL (default: http://localhost:8000)
        #[arg(long, default_value = "http://localhost:8000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb { database_url } => {
            tokio::task::spawn_blocking(move || seed::init_db(&database_url))
                .await
                .context("init-db task panicked")??;
        }
        Commands::Ping { server } => {
            ping(&server).await?;
        }
    }

    Ok(())
}

async fn ping(server: &str) -> Result<()> {
    let url = format!("{}/ping", server.trim_end_matches('/'));

    let response: PingResponse = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {url}"))?
        .error_for_status()?
        .json()
        .await
        .context("Unexpected ping response")?;

    println!("{} (database: {:?})", response.message, response.database);

    Ok(())
}
