//! Operator-configurable bot settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Thresholds the operator can tune at runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Whether the trading cycle performs any work
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Maximum investment per trade in currency units
    #[serde(default = "default_max_investment")]
    pub max_investment: f64,
    /// Stop loss percentage below average entry
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: f64,
    /// Take profit percentage above average entry
    #[serde(default = "default_take_profit_pct")]
    pub take_profit_pct: f64,
    /// Minimum pool liquidity in USD for the baseline filter
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,
    /// Minimum holder count for the baseline filter
    #[serde(default = "default_min_holders")]
    pub min_holders: u32,
    /// Multiplier applied to social mentions when scoring
    #[serde(default = "default_social_sentiment_weight")]
    pub social_sentiment_weight: f64,
}

fn default_enabled() -> bool { false }
fn default_max_investment() -> f64 { 100.0 }
fn default_stop_loss_pct() -> f64 { 10.0 }
fn default_take_profit_pct() -> f64 { 25.0 }
fn default_min_liquidity() -> f64 { 10_000.0 }
fn default_min_holders() -> u32 { 50 }
fn default_social_sentiment_weight() -> f64 { 1.0 }

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_investment: default_max_investment(),
            stop_loss_pct: default_stop_loss_pct(),
            take_profit_pct: default_take_profit_pct(),
            min_liquidity: default_min_liquidity(),
            min_holders: default_min_holders(),
            social_sentiment_weight: default_social_sentiment_weight(),
        }
    }
}

impl BotSettings {
    /// Validate all thresholds
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_investment <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "max_investment must be > 0, got {}",
                self.max_investment
            )));
        }
        if self.stop_loss_pct <= 0.0 || self.stop_loss_pct >= 100.0 {
            return Err(SettingsError::Invalid(format!(
                "stop_loss_pct must be in (0, 100), got {}",
                self.stop_loss_pct
            )));
        }
        if self.take_profit_pct <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "take_profit_pct must be > 0, got {}",
                self.take_profit_pct
            )));
        }
        if self.min_liquidity < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "min_liquidity must be >= 0, got {}",
                self.min_liquidity
            )));
        }
        if self.social_sentiment_weight < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "social_sentiment_weight must be >= 0, got {}",
                self.social_sentiment_weight
            )));
        }
        Ok(())
    }
}

/// Partial update applied over current settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub enabled: Option<bool>,
    pub max_investment: Option<f64>,
    pub stop_loss_pct: Option<f64>,
    pub take_profit_pct: Option<f64>,
    pub min_liquidity: Option<f64>,
    pub min_holders: Option<u32>,
    pub social_sentiment_weight: Option<f64>,
}

impl SettingsUpdate {
    /// Apply the present fields onto `settings`, validating the result
    pub fn apply(&self, settings: &mut BotSettings) -> Result<(), SettingsError> {
        let mut next = settings.clone();
        if let Some(enabled) = self.enabled {
            next.enabled = enabled;
        }
        if let Some(v) = self.max_investment {
            next.max_investment = v;
        }
        if let Some(v) = self.stop_loss_pct {
            next.stop_loss_pct = v;
        }
        if let Some(v) = self.take_profit_pct {
            next.take_profit_pct = v;
        }
        if let Some(v) = self.min_liquidity {
            next.min_liquidity = v;
        }
        if let Some(v) = self.min_holders {
            next.min_holders = v;
        }
        if let Some(v) = self.social_sentiment_weight {
            next.social_sentiment_weight = v;
        }
        next.validate()?;
        *settings = next;
        Ok(())
    }
}
