//! Capability traits for market data, indicators, and token discovery.
//!
//! The price contract is deliberately Option-shaped: external lookups are
//! best-effort, and any failure means "no data for this token this cycle",
//! never an error the caller must handle. Callers tolerate partial or
//! missing market data on every cycle.

use async_trait::async_trait;

use crate::domain::snapshot::{IndicatorSet, MarketSnapshot};
use crate::domain::token::Token;

/// Best-effort market snapshot source
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest snapshot for the token, or None when unavailable
    async fn snapshot(&self, token: &Token) -> Option<MarketSnapshot>;
}

/// Indicator estimation from a single snapshot
///
/// No historical series exists, so implementations estimate. Threshold
/// semantics (RSI bands, MACD sign, band offsets) must be preserved.
pub trait IndicatorProvider: Send + Sync {
    fn indicators(&self, token: &Token, snapshot: &MarketSnapshot) -> IndicatorSet;
}

/// Source of newly launched tokens
#[async_trait]
pub trait TokenDiscovery: Send + Sync {
    /// Tokens discovered since the last call; may be empty
    async fn discover(&self) -> Vec<Token>;
}
