//! Token metadata and discovery filters.
//!
//! A `Token` is created and updated by the discovery collaborator and is
//! read-only to the trading core. The two derived flags (`passes_filter`,
//! `high_alert`) are recomputed against current settings whenever metadata
//! changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::settings::BotSettings;

/// Liquidity multiple over the configured minimum for high-alert status
pub const HIGH_ALERT_LIQUIDITY_MULT: f64 = 5.0;

/// Minimum social mentions for high-alert status
pub const HIGH_ALERT_MIN_MENTIONS: u32 = 20;

/// A newly discovered token with market and social metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Token contract address (opaque identity)
    pub address: String,
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Chain identifier (e.g. "solana", "base")
    pub chain: String,
    /// Pool liquidity in USD
    pub liquidity: f64,
    /// Unique holder count
    pub holders: u32,
    /// 24-hour trading volume in USD
    pub volume_24h: f64,
    /// 24-hour price change percentage
    pub price_change_24h: f64,
    /// 24-hour transaction count
    pub tx_count_24h: u32,
    /// Social mention count
    pub social_mentions: u32,
    /// Launch timestamp
    pub launched_at: DateTime<Utc>,
    /// Passes the baseline liquidity/holder filter
    pub passes_filter: bool,
    /// Baseline pass plus elevated liquidity and social interest
    pub high_alert: bool,
}

impl Token {
    /// Create a token with metadata; flags start false until refreshed
    pub fn new(address: &str, name: &str, symbol: &str, chain: &str) -> Self {
        Self {
            address: address.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            chain: chain.to_string(),
            liquidity: 0.0,
            holders: 0,
            volume_24h: 0.0,
            price_change_24h: 0.0,
            tx_count_24h: 0,
            social_mentions: 0,
            launched_at: Utc::now(),
            passes_filter: false,
            high_alert: false,
        }
    }

    /// Token age in minutes since launch
    pub fn age_minutes(&self) -> f64 {
        let age = Utc::now().signed_duration_since(self.launched_at);
        age.num_seconds() as f64 / 60.0
    }

    /// Recompute the derived filter flags against current settings
    pub fn refresh_flags(&mut self, settings: &BotSettings) {
        self.passes_filter =
            self.liquidity >= settings.min_liquidity && self.holders >= settings.min_holders;
        self.high_alert = self.passes_filter
            && self.liquidity >= settings.min_liquidity * HIGH_ALERT_LIQUIDITY_MULT
            && self.social_mentions >= HIGH_ALERT_MIN_MENTIONS;
    }

    /// Social score used by the scorers (mentions scaled by sentiment weight)
    pub fn social_score(&self, sentiment_weight: f64) -> f64 {
        self.social_mentions as f64 * sentiment_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn settings() -> BotSettings {
        BotSettings {
            min_liquidity: 10_000.0,
            min_holders: 50,
            ..BotSettings::default()
        }
    }

    fn token() -> Token {
        let mut t = Token::new("0xabc", "Test Token", "TEST", "solana");
        t.liquidity = 25_000.0;
        t.holders = 100;
        t.volume_24h = 40_000.0;
        t.social_mentions = 10;
        t
    }

    #[test]
    fn test_baseline_filter() {
        let mut t = token();
        t.refresh_flags(&settings());
        assert!(t.passes_filter);
        assert!(!t.high_alert);

        t.liquidity = 5_000.0;
        t.refresh_flags(&settings());
        assert!(!t.passes_filter);
    }

    #[test]
    fn test_high_alert_requires_elevated_liquidity_and_mentions() {
        let mut t = token();
        t.liquidity = 60_000.0; // 6x min
        t.social_mentions = 25;
        t.refresh_flags(&settings());
        assert!(t.high_alert);

        t.social_mentions = 5;
        t.refresh_flags(&settings());
        assert!(t.passes_filter);
        assert!(!t.high_alert);
    }

    #[test]
    fn test_age_minutes() {
        let mut t = token();
        t.launched_at = Utc::now() - Duration::minutes(30);
        let age = t.age_minutes();
        assert!(age >= 29.9 && age <= 30.1);
    }

    #[test]
    fn test_social_score() {
        let t = token();
        assert_eq!(t.social_score(4.0), 40.0);
    }
}
