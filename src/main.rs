//! Commuter API gateway binary.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use commuter_gateway::config::{self, GatewayConfig};
use commuter_gateway::observability::{logging, metrics};
use commuter_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "commuter-gateway")]
#[command(about = "API gateway fronting the auth, route, and subscription services", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Environment variables
    /// override the file; defaults apply when neither is set.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding the configured bind address port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: GatewayConfig = config::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(h, _)| h.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        proxy_timeout_secs = config.timeouts.proxy_secs,
        probe_timeout_secs = config.timeouts.probe_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = GatewayServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
