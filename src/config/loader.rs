//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::application::CycleIntervals;
use crate::domain::BotSettings;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub trading: TradingSection,
    #[serde(default)]
    pub risk: RiskSection,
    #[serde(default)]
    pub filters: FiltersSection,
    #[serde(default)]
    pub market_data: MarketDataSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Trading configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct TradingSection {
    /// Whether trading starts enabled
    #[serde(default)]
    pub enabled: bool,
    /// Starting paper balance in currency units
    #[serde(default = "default_initial_balance")]
    pub initial_balance: f64,
    /// Maximum investment per trade in currency units
    #[serde(default = "default_max_investment")]
    pub max_investment: f64,
    /// Seconds between discovery/refresh passes
    #[serde(default = "default_refresh_secs")]
    pub refresh_interval_secs: u64,
    /// Seconds between trading passes
    #[serde(default = "default_trading_secs")]
    pub trading_interval_secs: u64,
    /// Seconds between risk monitor passes
    #[serde(default = "default_risk_secs")]
    pub risk_interval_secs: u64,
    /// Seconds between analytics rollups
    #[serde(default = "default_analytics_secs")]
    pub analytics_interval_secs: u64,
}

/// Risk management configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct RiskSection {
    /// Stop loss percentage below average entry
    #[serde(default = "default_stop_loss_pct")]
    pub stop_loss_pct: f64,
    /// Take profit percentage above average entry
    #[serde(default = "default_take_profit_pct")]
    pub take_profit_pct: f64,
}

/// Token filter configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct FiltersSection {
    /// Minimum pool liquidity in USD
    #[serde(default = "default_min_liquidity")]
    pub min_liquidity: f64,
    /// Minimum holder count
    #[serde(default = "default_min_holders")]
    pub min_holders: u32,
    /// Multiplier applied to social mentions when scoring
    #[serde(default = "default_social_weight")]
    pub social_sentiment_weight: f64,
}

/// Market data configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataSection {
    /// Use the randomized simulation providers instead of HTTP
    #[serde(default = "default_simulated")]
    pub simulated: bool,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_initial_balance() -> f64 { 10_000.0 }
fn default_max_investment() -> f64 { 100.0 }
fn default_refresh_secs() -> u64 { 30 }
fn default_trading_secs() -> u64 { 60 }
fn default_risk_secs() -> u64 { 15 }
fn default_analytics_secs() -> u64 { 300 }
fn default_stop_loss_pct() -> f64 { 10.0 }
fn default_take_profit_pct() -> f64 { 25.0 }
fn default_min_liquidity() -> f64 { 10_000.0 }
fn default_min_holders() -> u32 { 50 }
fn default_social_weight() -> f64 { 1.0 }
fn default_simulated() -> bool { true }
fn default_timeout_secs() -> u64 { 5 }
fn default_log_level() -> String { "info".to_string() }

impl Default for TradingSection {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_balance: default_initial_balance(),
            max_investment: default_max_investment(),
            refresh_interval_secs: default_refresh_secs(),
            trading_interval_secs: default_trading_secs(),
            risk_interval_secs: default_risk_secs(),
            analytics_interval_secs: default_analytics_secs(),
        }
    }
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            stop_loss_pct: default_stop_loss_pct(),
            take_profit_pct: default_take_profit_pct(),
        }
    }
}

impl Default for FiltersSection {
    fn default() -> Self {
        Self {
            min_liquidity: default_min_liquidity(),
            min_holders: default_min_holders(),
            social_sentiment_weight: default_social_weight(),
        }
    }
}

impl Default for MarketDataSection {
    fn default() -> Self {
        Self {
            simulated: default_simulated(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trading.initial_balance <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "initial_balance must be > 0, got {}",
                self.trading.initial_balance
            )));
        }

        if self.trading.max_investment <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_investment must be > 0, got {}",
                self.trading.max_investment
            )));
        }

        if self.trading.refresh_interval_secs == 0
            || self.trading.trading_interval_secs == 0
            || self.trading.risk_interval_secs == 0
            || self.trading.analytics_interval_secs == 0
        {
            return Err(ConfigError::ValidationError(
                "cycle intervals must be > 0".to_string(),
            ));
        }

        if self.risk.stop_loss_pct <= 0.0 || self.risk.stop_loss_pct >= 100.0 {
            return Err(ConfigError::ValidationError(format!(
                "stop_loss_pct must be in (0, 100), got {}",
                self.risk.stop_loss_pct
            )));
        }

        if self.risk.take_profit_pct <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "take_profit_pct must be > 0, got {}",
                self.risk.take_profit_pct
            )));
        }

        if self.filters.min_liquidity < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_liquidity must be >= 0, got {}",
                self.filters.min_liquidity
            )));
        }

        if self.filters.social_sentiment_weight < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "social_sentiment_weight must be >= 0, got {}",
                self.filters.social_sentiment_weight
            )));
        }

        if self.market_data.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn intervals(&self) -> CycleIntervals {
        CycleIntervals {
            refresh_secs: self.trading.refresh_interval_secs,
            trading_secs: self.trading.trading_interval_secs,
            risk_secs: self.trading.risk_interval_secs,
            analytics_secs: self.trading.analytics_interval_secs,
        }
    }
}

impl From<&Config> for BotSettings {
    fn from(config: &Config) -> Self {
        BotSettings {
            enabled: config.trading.enabled,
            max_investment: config.trading.max_investment,
            stop_loss_pct: config.risk.stop_loss_pct,
            take_profit_pct: config.risk.take_profit_pct,
            min_liquidity: config.filters.min_liquidity,
            min_holders: config.filters.min_holders,
            social_sentiment_weight: config.filters.social_sentiment_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
[trading]
enabled = true
initial_balance = 5000.0
max_investment = 50.0
refresh_interval_secs = 20
trading_interval_secs = 45
risk_interval_secs = 10
analytics_interval_secs = 120

[risk]
stop_loss_pct = 8.0
take_profit_pct = 20.0

[filters]
min_liquidity = 25000.0
min_holders = 100
social_sentiment_weight = 1.5

[market_data]
simulated = true
request_timeout_secs = 5

[logging]
level = "debug"
"#;

    #[test]
    fn test_parse_valid_config() {
        let config = parse_config(VALID_CONFIG).unwrap();
        assert!(config.trading.enabled);
        assert_eq!(config.trading.initial_balance, 5000.0);
        assert_eq!(config.risk.stop_loss_pct, 8.0);
        assert_eq!(config.filters.min_holders, 100);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(!config.trading.enabled);
        assert_eq!(config.trading.initial_balance, 10_000.0);
        assert_eq!(config.risk.take_profit_pct, 25.0);
        assert!(config.market_data.simulated);
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = parse_config("[trading]\nmax_investment = 200.0\n").unwrap();
        assert_eq!(config.trading.max_investment, 200.0);
        assert_eq!(config.trading.refresh_interval_secs, 30);
    }

    #[test]
    fn test_invalid_stop_loss_rejected() {
        let result = parse_config("[risk]\nstop_loss_pct = 150.0\n");
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = parse_config("[trading]\ntrading_interval_secs = 0\n");
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_settings_conversion() {
        let config = parse_config(VALID_CONFIG).unwrap();
        let settings = BotSettings::from(&config);
        assert!(settings.enabled);
        assert_eq!(settings.max_investment, 50.0);
        assert_eq!(settings.stop_loss_pct, 8.0);
        assert_eq!(settings.min_liquidity, 25_000.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_intervals_conversion() {
        let config = parse_config(VALID_CONFIG).unwrap();
        let intervals = config.intervals();
        assert_eq!(intervals.refresh_secs, 20);
        assert_eq!(intervals.analytics_secs, 120);
    }
}
