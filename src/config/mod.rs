use anyhow::bail;

use crate::market_data::adapters::coingecko::DEFAULT_API_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let api_url = lookup("PRICE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if api_url.trim().is_empty() {
            bail!("PRICE_API_URL is set but empty");
        }

        Ok(Self { log_level, api_url })
    }
}
