//! Service configuration
//!
//! Settings come from CLI flags first, then environment variables, then
//! built-in defaults. The per-call upstream timeout defaults to 8 seconds.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use url::Url;

const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8081";
const DEFAULT_TIMEOUT_SECS: u64 = 8;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(name = "folioquery", about = "Portfolio aggregation query service")]
pub struct Cli {
    /// Base URL of the upstream portfolio-data API
    #[arg(long)]
    pub upstream_url: Option<String>,

    /// Per-call upstream timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Host address to bind the server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the server to
    #[arg(long)]
    pub port: Option<u16>,
}

/// Resolved, immutable configuration handed to the rest of the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream_base_url: Url,
    pub upstream_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let raw_upstream_url = cli
            .upstream_url
            .clone()
            .or_else(|| env::var("FOLIOQUERY_UPSTREAM_URL").ok())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());

        let upstream_base_url = Url::parse(&raw_upstream_url)
            .map_err(|e| anyhow!("Invalid upstream URL '{}': {}", raw_upstream_url, e))?;
        if upstream_base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "Upstream URL '{}' must be a hierarchical URL",
                raw_upstream_url
            ));
        }

        let timeout_secs = match cli.timeout_secs {
            Some(secs) => secs,
            None => match env::var("FOLIOQUERY_TIMEOUT_SECS") {
                Ok(raw) => raw
                    .parse()
                    .context("FOLIOQUERY_TIMEOUT_SECS must be a number of seconds")?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(anyhow!("Upstream timeout must be at least 1 second"));
        }

        let host = cli
            .host
            .clone()
            .or_else(|| env::var("HOST").ok())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match env::var("PORT") {
                Ok(raw) => raw.parse().context("PORT must be a valid port number")?,
                Err(_) => DEFAULT_PORT,
            },
        };

        Ok(Self {
            upstream_base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            host,
            port,
        })
    }
}
