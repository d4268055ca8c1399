//! Randomized providers for demo mode.
//!
//! These stand in for live data sources when running without network access.
//! Discovery mints plausible-looking tokens, market data derives a drifting
//! price from token liquidity and volume, and indicators are sampled around
//! the current price. Tests use the deterministic mocks in `ports::mocks`
//! instead.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::domain::{IndicatorSet, MarketSnapshot, Token, BOLLINGER_OFFSET};
use crate::ports::{IndicatorProvider, MarketDataProvider, TokenDiscovery};
use crate::strategy::estimate_token_price;

const NAME_PARTS: &[&str] = &[
    "Moon", "Doge", "Pepe", "Giga", "Turbo", "Shiba", "Rocket", "Frog", "Chad", "Wojak",
];
const NAME_SUFFIXES: &[&str] = &["Inu", "Coin", "Cat", "AI", "Bonk", "Moon", "X", "Swap"];

/// Tokens minted per discovery pass
const DISCOVERY_BATCH: usize = 3;

/// Randomized token discovery
#[derive(Debug, Default)]
pub struct SimulatedDiscovery;

impl SimulatedDiscovery {
    pub fn new() -> Self {
        Self
    }

    fn mint_token() -> Token {
        let mut rng = rand::thread_rng();
        let part = NAME_PARTS[rng.gen_range(0..NAME_PARTS.len())];
        let suffix = NAME_SUFFIXES[rng.gen_range(0..NAME_SUFFIXES.len())];
        let serial: u32 = rng.gen_range(100..10_000);

        let mut token = Token::new(
            &format!("sim{serial}{:08x}", rng.gen::<u32>()),
            &format!("{part} {suffix}"),
            &format!("{}{}", &part.to_uppercase()[..part.len().min(4)], serial % 100),
            "solana",
        );
        token.liquidity = rng.gen_range(1_000.0..200_000.0);
        token.holders = rng.gen_range(10..2_000);
        token.volume_24h = rng.gen_range(500.0..500_000.0);
        token.price_change_24h = rng.gen_range(-80.0..120.0);
        token.tx_count_24h = rng.gen_range(10..5_000);
        token.social_mentions = rng.gen_range(0..80);
        token.launched_at = Utc::now() - Duration::minutes(rng.gen_range(1..240));
        token
    }
}

#[async_trait]
impl TokenDiscovery for SimulatedDiscovery {
    async fn discover(&self) -> Vec<Token> {
        (0..DISCOVERY_BATCH).map(|_| Self::mint_token()).collect()
    }
}

/// Market data derived from token metadata with random drift
#[derive(Debug, Default)]
pub struct SimulatedMarketData;

impl SimulatedMarketData {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MarketDataProvider for SimulatedMarketData {
    async fn snapshot(&self, token: &Token) -> Option<MarketSnapshot> {
        let mut rng = rand::thread_rng();
        // Drift around the liquidity-derived base price
        let base = estimate_token_price(token.liquidity, token.volume_24h);
        let price = base * rng.gen_range(0.85..1.15);
        let volume = token.volume_24h * rng.gen_range(0.8..1.3);
        let change = token.price_change_24h + rng.gen_range(-5.0..5.0);
        let market_cap = token.liquidity * rng.gen_range(2.0..8.0);
        Some(MarketSnapshot::new(price, volume, change, market_cap))
    }
}

/// Indicator estimates sampled around the snapshot price
#[derive(Debug, Default)]
pub struct SimulatedIndicators;

impl SimulatedIndicators {
    pub fn new() -> Self {
        Self
    }
}

impl IndicatorProvider for SimulatedIndicators {
    fn indicators(&self, token: &Token, snapshot: &MarketSnapshot) -> IndicatorSet {
        let mut rng = rand::thread_rng();
        let price = snapshot.price;

        // Bias RSI by recent momentum so trending tokens look trending
        let rsi_center = 50.0 + (token.price_change_24h / 4.0).clamp(-25.0, 25.0);
        let rsi = (rsi_center + rng.gen_range(-15.0..15.0)).clamp(1.0, 99.0);

        let sma_20 = price * rng.gen_range(0.92..1.02);
        let sma_50 = sma_20 * rng.gen_range(0.90..1.05);
        let macd = price * rng.gen_range(-0.02..0.03);
        let macd_signal = macd * rng.gen_range(0.5..1.2);

        IndicatorSet {
            rsi,
            sma_20,
            sma_50,
            macd,
            macd_signal,
            macd_histogram: macd - macd_signal,
            bollinger_upper: price * (1.0 + BOLLINGER_OFFSET),
            bollinger_middle: price,
            bollinger_lower: price * (1.0 - BOLLINGER_OFFSET),
            volume_profile: snapshot.volume_24h * rng.gen_range(0.3..1.0),
        }
    }
}
