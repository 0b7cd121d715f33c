use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::market_data::traits::{FetchError, PriceSource};
use crate::market_data::types::{AssetId, PriceSnapshot};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

#[derive(Debug, Deserialize)]
struct UsdQuote {
    #[serde(default)]
    usd: Option<f64>,
}

/// Simple-price client. The underlying `reqwest::Client` is built once and
/// reused for every tick.
#[derive(Clone, Debug)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Ids are percent-encoded as one `ids` query value, so reserved
    /// characters such as `#` or `&` cannot split the list.
    pub fn request(&self, ids: &[AssetId]) -> Result<Request, FetchError> {
        let joined = ids.iter().map(AssetId::as_str).collect::<Vec<_>>().join(",");
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("vs_currencies", "usd"), ("ids", joined.as_str())])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch(&self, ids: &[AssetId]) -> Result<PriceSnapshot, FetchError> {
        let request = self.request(ids)?;
        debug!(url = %request.url(), "fetching prices");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }

        let body = response.text().await?;
        parse_snapshot(&body)
    }
}

/// Decodes `{"<id>": {"usd": <price>}, ...}`.
///
/// Entries without a usable `usd` price are skipped rather than rejected;
/// anything that is not an object of objects is malformed.
pub fn parse_snapshot(body: &str) -> Result<PriceSnapshot, FetchError> {
    let root: Map<String, Value> =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let mut snapshot = PriceSnapshot::new();
    for (key, value) in root {
        let quote: UsdQuote = serde_json::from_value(value)
            .map_err(|e| FetchError::Malformed(format!("{key}: {e}")))?;

        let Some(price) = quote.usd else {
            debug!(asset = %key, "no usd price in response");
            continue;
        };
        if !price.is_finite() || price < 0.0 {
            debug!(asset = %key, price, "discarding unusable price");
            continue;
        }
        let Some(asset) = AssetId::new(&key) else {
            continue;
        };
        snapshot.push(asset, price);
    }

    Ok(snapshot)
}
