use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobboard::app::{app, AppState};
use jobboard::config::AppConfig;
use jobboard::database::{DatabaseManager, PgStore};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Intranet board for jobs and departments")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides JOBBOARD_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobboard=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::info!("Starting jobboard in {:?} mode", config.environment);

    if config.is_development() && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("Using the built-in development JWT secret");
    }
    if config.security.jwt_secret.is_empty() {
        bail!("JWT_SECRET must be set outside development");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to prepare the database schema")?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(Arc::new(PgStore::new(pool)), config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
