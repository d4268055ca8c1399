//! Ports Layer - Trait abstractions between the core and the outside world

pub mod market_data;
pub mod mocks;

pub use market_data::{IndicatorProvider, MarketDataProvider, TokenDiscovery};
