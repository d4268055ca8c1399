//! Launch-window scorer.
//!
//! Alternate strategy for tokens too young to have any indicator estimate:
//! only liquidity, holders, momentum, turnover, social interest, and age
//! feed the score. Thresholds differ from the momentum scorer and the two
//! variants are deliberately kept separate.

use tracing::debug;

use crate::domain::settings::BotSettings;
use crate::domain::signal::{Signal, TradeAction};
use crate::domain::token::Token;
use crate::strategy::EARLY_LAUNCH_WINDOW_MIN;

/// Strategy name recorded on emitted signals
pub const STRATEGY_NAME: &str = "launch";

/// Minimum accumulated confidence for a signal to be emitted
pub const MIN_CONFIDENCE: i32 = 50;

/// Hard cap on emitted confidence
pub const MAX_CONFIDENCE: i32 = 95;

/// Floor for the estimated price fallback
pub const MIN_ESTIMATED_PRICE: f64 = 1e-9;

const W_DEEP_LIQUIDITY: i32 = 20;
const W_HOLDER_BASE: i32 = 15;
const W_MOMENTUM: i32 = 20;
const W_TURNOVER: i32 = 15;
const W_SOCIAL_BUZZ: i32 = 15;
const W_EARLY_LAUNCH: i32 = 15;

/// 24h price change above which the momentum heuristic fires, in percent
const MOMENTUM_THRESHOLD_PCT: f64 = 20.0;

/// Social score above which the social heuristic fires
const SOCIAL_SCORE_THRESHOLD: f64 = 30.0;

/// Estimate a price from liquidity and volume when no snapshot exists
///
/// Logarithmic in liquidity so deep pools do not explode the estimate,
/// scaled up by turnover. Floored to keep downstream division safe.
pub fn estimate_token_price(liquidity: f64, volume_24h: f64) -> f64 {
    let base = (1.0 + liquidity / 10_000.0).ln();
    let turnover = 1.0 + volume_24h / (liquidity + 1.0);
    (base * turnover / 1_000.0).max(MIN_ESTIMATED_PRICE)
}

/// Metadata-only scorer for freshly launched tokens
#[derive(Debug, Clone, Default)]
pub struct LaunchScorer;

impl LaunchScorer {
    /// Score a token from metadata alone
    ///
    /// `price` is the latest known price if any; when absent the
    /// liquidity/volume estimate is used as the signal's reference price.
    pub fn score(&self, token: &Token, price: Option<f64>, settings: &BotSettings) -> Option<Signal> {
        let mut confidence: i32 = 0;
        let mut reasons: Vec<&str> = Vec::new();

        if token.liquidity > 2.0 * settings.min_liquidity {
            confidence += W_DEEP_LIQUIDITY;
            reasons.push("deep liquidity");
        }

        if token.holders as f64 > 1.5 * settings.min_holders as f64 {
            confidence += W_HOLDER_BASE;
            reasons.push("broad holder base");
        }

        if token.price_change_24h > MOMENTUM_THRESHOLD_PCT {
            confidence += W_MOMENTUM;
            reasons.push("strong momentum");
        }

        if token.volume_24h > token.liquidity {
            confidence += W_TURNOVER;
            reasons.push("high turnover");
        }

        if token.social_score(settings.social_sentiment_weight) > SOCIAL_SCORE_THRESHOLD {
            confidence += W_SOCIAL_BUZZ;
            reasons.push("social buzz");
        }

        if token.age_minutes() < EARLY_LAUNCH_WINDOW_MIN {
            confidence += W_EARLY_LAUNCH;
            reasons.push("early launch");
        }

        if confidence < MIN_CONFIDENCE {
            debug!(
                "{}: launch confidence {} below {}, no signal",
                token.symbol, confidence, MIN_CONFIDENCE
            );
            return None;
        }

        let confidence = confidence.min(MAX_CONFIDENCE) as u8;
        let action = if confidence > 80 {
            TradeAction::Buy
        } else if confidence > 60 {
            TradeAction::Buy
        } else {
            TradeAction::Hold
        };

        let reference_price =
            price.unwrap_or_else(|| estimate_token_price(token.liquidity, token.volume_24h));

        Some(Signal::new(
            &token.address,
            &token.symbol,
            action,
            confidence,
            &reasons,
            reference_price,
            STRATEGY_NAME,
        ))
    }
}
