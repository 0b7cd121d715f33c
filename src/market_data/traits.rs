use async_trait::async_trait;
use thiserror::Error;

use crate::market_data::types::{AssetId, PriceSnapshot};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed")]
    Transport(#[source] reqwest::Error),

    #[error("price API returned status {status}")]
    Status { status: u16 },

    #[error("request timed out")]
    Timeout,

    #[error("malformed price response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err)
        }
    }
}

/// One request per call, no internal retry. The caller retries on its
/// next scheduled tick.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self, ids: &[AssetId]) -> Result<PriceSnapshot, FetchError>;
}
