//! Market snapshots and estimated technical indicators.
//!
//! A snapshot is the latest known price/volume state for one token. No time
//! series is retained, so indicators derived from a snapshot are estimates,
//! not true historical computations. Downstream code only relies on the
//! threshold semantics (RSI <30 oversold / >70 overbought, band offsets).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synthetic bid/ask half-spread as a fraction of price
pub const SYNTHETIC_SPREAD: f64 = 0.005;

/// Bollinger band offset from the middle band as a fraction of price
pub const BOLLINGER_OFFSET: f64 = 0.04;

/// Latest known market state for a token, overwritten every refresh cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Last price in USD
    pub price: f64,
    /// Synthetic bid (price less half-spread)
    pub bid: f64,
    /// Synthetic ask (price plus half-spread)
    pub ask: f64,
    /// 24-hour volume in USD
    pub volume_24h: f64,
    /// 24-hour price change percentage
    pub price_change_24h: f64,
    /// Estimated market capitalization in USD
    pub market_cap: f64,
    /// Capture timestamp
    pub captured_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Build a snapshot from observed values, deriving the synthetic spread
    pub fn new(price: f64, volume_24h: f64, price_change_24h: f64, market_cap: f64) -> Self {
        Self {
            price,
            bid: price * (1.0 - SYNTHETIC_SPREAD),
            ask: price * (1.0 + SYNTHETIC_SPREAD),
            volume_24h,
            price_change_24h,
            market_cap,
            captured_at: Utc::now(),
        }
    }
}

/// Estimated indicator values for a token
///
/// Any provider that replaces the heuristic estimator with a real indicator
/// library must preserve the threshold semantics consumed by the scorers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Relative strength index, bounded 0-100
    pub rsi: f64,
    /// 20-period simple moving average estimate
    pub sma_20: f64,
    /// 50-period simple moving average estimate
    pub sma_50: f64,
    /// MACD line
    pub macd: f64,
    /// MACD signal line
    pub macd_signal: f64,
    /// MACD histogram
    pub macd_histogram: f64,
    /// Upper Bollinger band (fixed offset above price)
    pub bollinger_upper: f64,
    /// Middle Bollinger band (price)
    pub bollinger_middle: f64,
    /// Lower Bollinger band (fixed offset below price)
    pub bollinger_lower: f64,
    /// Normalized volume profile in USD, compared against 24h volume
    pub volume_profile: f64,
}

impl IndicatorSet {
    /// Neutral indicator set centered on a reference price
    ///
    /// RSI sits mid-range and the MACD triple is flat, so no scorer
    /// heuristic fires from indicators alone.
    pub fn neutral(price: f64, volume_24h: f64) -> Self {
        Self {
            rsi: 50.0,
            sma_20: price,
            sma_50: price,
            macd: 0.0,
            macd_signal: 0.0,
            macd_histogram: 0.0,
            bollinger_upper: price * (1.0 + BOLLINGER_OFFSET),
            bollinger_middle: price,
            bollinger_lower: price * (1.0 - BOLLINGER_OFFSET),
            volume_profile: volume_24h,
        }
    }

    /// RSI below the oversold threshold
    pub fn is_oversold(&self) -> bool {
        self.rsi < 30.0
    }

    /// RSI above the overbought threshold
    pub fn is_overbought(&self) -> bool {
        self.rsi > 70.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_snapshot_synthetic_spread() {
        let snap = MarketSnapshot::new(2.0, 10_000.0, 5.0, 1_000_000.0);
        assert_relative_eq!(snap.bid, 1.99, epsilon = 1e-9);
        assert_relative_eq!(snap.ask, 2.01, epsilon = 1e-9);
        assert!(snap.bid < snap.price && snap.price < snap.ask);
    }

    #[test]
    fn test_neutral_indicators_trigger_nothing() {
        let ind = IndicatorSet::neutral(1.0, 5_000.0);
        assert!(!ind.is_oversold());
        assert!(!ind.is_overbought());
        assert_eq!(ind.macd_histogram, 0.0);
        assert_relative_eq!(ind.bollinger_upper, 1.04, epsilon = 1e-9);
        assert_relative_eq!(ind.bollinger_lower, 0.96, epsilon = 1e-9);
    }

    #[test]
    fn test_rsi_thresholds() {
        let mut ind = IndicatorSet::neutral(1.0, 5_000.0);
        ind.rsi = 25.0;
        assert!(ind.is_oversold());
        ind.rsi = 75.0;
        assert!(ind.is_overbought());
        ind.rsi = 30.0;
        assert!(!ind.is_oversold());
    }
}
