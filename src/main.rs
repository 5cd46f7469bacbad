use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tourdesk_api::{app, config::AppConfig, state::AppState, users::MemoryUserStore};

#[derive(Debug, Parser)]
#[command(name = "tourdesk-api", version, about = "Tour operator web backend")]
struct Args {
    /// Address to bind (overrides TOURDESK_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides TOURDESK_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SESSION_SECRET etc.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    // A missing or weak signing secret stops the process here.
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!(
        "Starting Tourdesk in {:?} mode (session TTL {}h)",
        config.environment,
        config.session.ttl_hours
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, Arc::new(MemoryUserStore::new()));
    state
        .bootstrap_admin()
        .await
        .context("failed to create bootstrap admin")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Tourdesk listening on http://{}", bind_addr);

    axum::serve(listener, app::router(state)).await.context("server error")?;
    Ok(())
}
