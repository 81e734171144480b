use std::{net::SocketAddr, time::Duration};

use annis_search::{app, config::CliConfig};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let config = CliConfig::parse();
    let app = app(&config, SESSION_CLEANUP_INTERVAL).await?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Starting server at {}", config.frontend_prefix);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
