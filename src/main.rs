use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use price_watch::cli::Cli;
use price_watch::config::Config;
use price_watch::market_data::adapters::coingecko::CoinGeckoClient;
use price_watch::metrics::init_metrics_server;
use price_watch::monitor::{Monitor, TokioDelay};

fn init_tracing(log_level: &str) {
    // stdout carries the price feed; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    if let Some(port) = cli.metrics_port {
        init_metrics_server(port)?;
        info!(port, "metrics exporter listening");
    }

    info!(api_url = %config.api_url, "price-watch starting");

    // One HTTP client for the life of the process.
    let source = CoinGeckoClient::new(config.api_url.clone(), cli.request_timeout())?;
    let mut monitor = Monitor::new(source, TokioDelay, std::io::stdout(), cli.settings());

    tokio::select! {
        res = monitor.run() => {
            if let Err(err) = &res {
                warn!(error = %format!("{err:#}"), "monitor stopped");
            }
            res?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("received Ctrl-C, shutting down");
        }
    }

    Ok(())
}
