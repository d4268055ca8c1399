//! DexScreener market data provider.
//!
//! Fetches live pair data over HTTP and maps the best pair for a token into
//! a `MarketSnapshot`. Fetch failures degrade to `None` so one flaky request
//! never aborts a trading cycle.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{MarketSnapshot, Token};
use crate::ports::MarketDataProvider;

const DEXSCREENER_TOKEN_API: &str = "https://api.dexscreener.com/latest/dex/tokens";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("No pair data for token: {0}")]
    NoPairData(String),
}

/// HTTP client for DexScreener pair lookups
#[derive(Debug, Clone)]
pub struct DexScreenerFeed {
    http: Client,
    base_url: String,
}

impl DexScreenerFeed {
    pub fn new() -> Result<Self, FeedError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: DEXSCREENER_TOKEN_API.to_string() })
    }

    /// Fetch the most liquid pair for a token address
    async fn fetch_best_pair(&self, address: &str) -> Result<PairData, FeedError> {
        let url = format!("{}/{}", self.base_url, address);
        let response: TokenResponse = self.http.get(&url).send().await?.json().await?;

        response
            .pairs
            .unwrap_or_default()
            .into_iter()
            .max_by(|a, b| {
                let la = a.liquidity.as_ref().map(|l| l.usd).unwrap_or(0.0);
                let lb = b.liquidity.as_ref().map(|l| l.usd).unwrap_or(0.0);
                la.total_cmp(&lb)
            })
            .ok_or_else(|| FeedError::NoPairData(address.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for DexScreenerFeed {
    async fn snapshot(&self, token: &Token) -> Option<MarketSnapshot> {
        match self.fetch_best_pair(&token.address).await {
            Ok(pair) => {
                let price = pair.price_usd.as_deref().and_then(|p| p.parse::<f64>().ok())?;
                Some(MarketSnapshot::new(
                    price,
                    pair.volume.map(|v| v.h24).unwrap_or(token.volume_24h),
                    pair.price_change.map(|c| c.h24).unwrap_or(token.price_change_24h),
                    pair.fdv.unwrap_or(0.0),
                ))
            }
            Err(err) => {
                debug!("Market data fetch failed for {}: {}", token.symbol, err);
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    pairs: Option<Vec<PairData>>,
}

#[derive(Debug, Deserialize)]
struct PairData {
    #[serde(rename = "priceUsd")]
    price_usd: Option<String>,
    liquidity: Option<LiquidityData>,
    volume: Option<WindowedData>,
    #[serde(rename = "priceChange")]
    price_change: Option<WindowedData>,
    fdv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LiquidityData {
    usd: f64,
}

#[derive(Debug, Deserialize)]
struct WindowedData {
    #[serde(default)]
    h24: f64,
}
