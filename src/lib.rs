//! Polls a spot price endpoint on a fixed interval, prints the latest price
//! per tracked asset with its change since the previous tick, and raises an
//! alert line when that change reaches the configured threshold.

pub mod cli;
pub mod config;
pub mod market_data;
pub mod metrics;
pub mod monitor;
pub mod output;
pub mod state;
pub mod strategy;

pub use market_data::traits::{FetchError, PriceSource};
pub use market_data::types::{AssetId, PriceSnapshot};
pub use monitor::{Monitor, MonitorSettings, TickOutcome};
