//! Configuration loading and validation.

mod loader;

pub use loader::{
    load_config, parse_config, Config, ConfigError, FiltersSection, LoggingSection,
    MarketDataSection, RiskSection, TradingSection,
};
