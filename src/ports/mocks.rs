//! Deterministic provider doubles for tests.
//!
//! Unlike the simulation adapters these never touch a random generator, so
//! test assertions are exact.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::snapshot::{IndicatorSet, MarketSnapshot};
use crate::domain::token::Token;
use crate::ports::market_data::{IndicatorProvider, MarketDataProvider, TokenDiscovery};

/// Market data provider serving pre-configured snapshots
///
/// Queuing several snapshots for one address serves them in order, with the
/// last one repeating, so tests can script a price path across refreshes.
#[derive(Debug, Default)]
pub struct FixedMarketData {
    snapshots: Mutex<HashMap<String, Vec<MarketSnapshot>>>,
}

impl FixedMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue a snapshot for a token address
    pub fn with_snapshot(self, address: &str, snapshot: MarketSnapshot) -> Self {
        self.snapshots
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push(snapshot);
        self
    }
}

#[async_trait]
impl MarketDataProvider for FixedMarketData {
    async fn snapshot(&self, token: &Token) -> Option<MarketSnapshot> {
        let mut snapshots = self.snapshots.lock().unwrap();
        let queue = snapshots.get_mut(&token.address)?;
        if queue.len() > 1 {
            Some(queue.remove(0))
        } else {
            queue.first().cloned()
        }
    }
}

/// Indicator provider serving pre-configured sets, neutral by default
#[derive(Debug, Default)]
pub struct FixedIndicators {
    sets: HashMap<String, IndicatorSet>,
}

impl FixedIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set indicators for a token address
    pub fn with_indicators(mut self, address: &str, set: IndicatorSet) -> Self {
        self.sets.insert(address.to_string(), set);
        self
    }
}

impl IndicatorProvider for FixedIndicators {
    fn indicators(&self, token: &Token, snapshot: &MarketSnapshot) -> IndicatorSet {
        self.sets
            .get(&token.address)
            .cloned()
            .unwrap_or_else(|| IndicatorSet::neutral(snapshot.price, snapshot.volume_24h))
    }
}

/// Discovery source draining queued batches, one per call
#[derive(Debug, Default)]
pub struct FixedDiscovery {
    batches: Mutex<Vec<Vec<Token>>>,
}

impl FixedDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue a discovery batch
    pub fn with_batch(self, tokens: Vec<Token>) -> Self {
        self.batches.lock().unwrap().push(tokens);
        self
    }
}

#[async_trait]
impl TokenDiscovery for FixedDiscovery {
    async fn discover(&self) -> Vec<Token> {
        let mut batches = self.batches.lock().unwrap();
        if batches.is_empty() {
            Vec::new()
        } else {
            batches.remove(0)
        }
    }
}
