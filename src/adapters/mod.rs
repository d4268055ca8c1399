//! Adapters Layer - External-facing implementations
//!
//! Concrete providers behind the port traits (HTTP price feed, randomized
//! simulation) plus the shared in-memory token directory.

pub mod directory;
pub mod price_feed;
pub mod simulated;

pub use directory::TokenDirectory;
pub use price_feed::{DexScreenerFeed, FeedError, DEFAULT_TIMEOUT_SECS};
pub use simulated::{SimulatedDiscovery, SimulatedIndicators, SimulatedMarketData};
