//! linechatd - line-oriented chat relay daemon.

use linechat::Gateway;
use linechat::config::Config;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration; without a path every default applies
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => {
            info!("No config file given, using defaults");
            Config::default()
        }
    };

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        "Starting linechatd"
    );

    // Validation happens inside bind
    let gateway = Gateway::bind(config).await?;

    {
        let state = gateway.state();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received");
                    state.shutdown();
                }
                Err(e) => warn!(error = %e, "Failed to listen for interrupt"),
            }
        });
    }

    gateway.run().await;
    info!("Server stopped");

    Ok(())
}
