use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use folioquery::config::{AppConfig, Cli};
use folioquery::server::{self, AppState};
use folioquery::{logging, AggregationEngine, HttpUpstreamClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging()?;

    let config = AppConfig::load(&cli)?;

    match run(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Application error: {}", e);

            // Log error chain if available
            let mut source = e.source();
            while let Some(err) = source {
                tracing::error!("   Caused by: {}", err);
                source = err.source();
            }

            Err(e)
        }
    }
}

async fn run(config: AppConfig) -> Result<()> {
    let client = HttpUpstreamClient::new(config.upstream_base_url.clone(), config.upstream_timeout);
    let state = AppState {
        engine: Arc::new(AggregationEngine::new(client)),
    };

    let app = server::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid HOST:PORT configuration")?;

    tracing::info!(
        "folioquery v{} listening on {} (upstream: {})",
        env!("CARGO_PKG_VERSION"),
        addr,
        config.upstream_base_url
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
