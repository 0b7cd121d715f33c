use std::time::Duration;

use clap::Parser;

use crate::market_data::types::{parse_symbols, AssetId};
use crate::monitor::MonitorSettings;

#[derive(Debug, Parser)]
#[command(author, version, about = "Spot price monitor with per-tick spike alerts")]
pub struct Cli {
    /// Comma-separated asset ids, e.g. bitcoin,ethereum,solana
    #[arg(long, value_parser = parse_symbol_list)]
    pub symbols: SymbolList,

    /// Seconds between fetches
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Spike alert threshold in percent
    #[arg(long, default_value_t = 1.0, value_parser = parse_threshold)]
    pub spike: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Serve Prometheus metrics on this port
    #[arg(long)]
    pub metrics_port: Option<u16>,
}

impl Cli {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn settings(&self) -> MonitorSettings {
        MonitorSettings {
            ids: self.symbols.0.clone(),
            interval: Duration::from_secs(self.interval),
            spike_pct: self.spike,
            color: !self.no_color,
        }
    }
}

/// Non-empty list of asset ids.
#[derive(Debug, Clone)]
pub struct SymbolList(pub Vec<AssetId>);

fn parse_symbol_list(raw: &str) -> Result<SymbolList, String> {
    let ids = parse_symbols(raw);
    if ids.is_empty() {
        return Err("expected at least one asset id".to_string());
    }
    Ok(SymbolList(ids))
}

fn parse_threshold(raw: &str) -> Result<f64, String> {
    let pct: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if !pct.is_finite() || pct < 0.0 {
        return Err("threshold must be a non-negative number".to_string());
    }
    Ok(pct)
}
