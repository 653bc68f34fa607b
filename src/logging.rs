use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize console logging for the service.
///
/// Honors `RUST_LOG` when set; defaults to info-level for the service and
/// the HTTP trace layer.
pub fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folioquery=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();

    Ok(())
}
