//! In-memory token directory.
//!
//! Shared registry of every token the bot has seen, keyed by address.
//! Discovery inserts into it, the trading cycle reads from it, and filter
//! flags are recomputed here whenever settings change.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::domain::{BotSettings, Token};

/// Thread-safe token registry
#[derive(Debug, Default)]
pub struct TokenDirectory {
    tokens: RwLock<HashMap<String, Token>>,
}

impl TokenDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token, recomputing its filter flags
    pub fn upsert(&self, mut token: Token, settings: &BotSettings) {
        token.refresh_flags(settings);
        let mut tokens = self.tokens.write().expect("token directory lock poisoned");
        if tokens.insert(token.address.clone(), token).is_none() {
            debug!("Directory grew to {} tokens", tokens.len());
        }
    }

    pub fn get(&self, address: &str) -> Option<Token> {
        self.tokens
            .read()
            .expect("token directory lock poisoned")
            .get(address)
            .cloned()
    }

    /// All tokens, newest launch first
    pub fn all_tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<Token> = self
            .tokens
            .read()
            .expect("token directory lock poisoned")
            .values()
            .cloned()
            .collect();
        tokens.sort_by(|a, b| b.launched_at.cmp(&a.launched_at));
        tokens
    }

    /// Tokens currently passing the quality filter, newest first
    pub fn tradeable_tokens(&self) -> Vec<Token> {
        let mut tokens = self.all_tokens();
        tokens.retain(|t| t.passes_filter);
        tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.read().expect("token directory lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recompute filter and alert flags for every token
    ///
    /// Called after a settings update so stored flags stay consistent with
    /// the active thresholds.
    pub fn refresh_flags(&self, settings: &BotSettings) {
        let mut tokens = self.tokens.write().expect("token directory lock poisoned");
        for token in tokens.values_mut() {
            token.refresh_flags(settings);
        }
    }
}
