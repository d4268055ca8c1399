//! Trading signals emitted by the scorers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Action attached to a signal or trade
///
/// The scorers only ever emit `Buy` or `Hold`; `Sell` originates from the
/// risk monitor's forced exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
            TradeAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// A scored trading signal for one token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Unique signal id
    pub id: String,
    /// Target token address
    pub token_address: String,
    /// Token symbol (for logging)
    pub token_symbol: String,
    /// Signal action
    pub action: TradeAction,
    /// Heuristic confidence, 0-95
    pub confidence: u8,
    /// Comma-joined heuristic labels in evaluation order
    pub reason: String,
    /// Reference price at signal creation
    pub price: f64,
    /// Originating strategy name
    pub strategy: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Whether the signal has been executed (set exactly once)
    executed: bool,
}

impl Signal {
    pub fn new(
        token_address: &str,
        token_symbol: &str,
        action: TradeAction,
        confidence: u8,
        reasons: &[&str],
        price: f64,
        strategy: &str,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            id: format!("{}-{}", token_symbol, created_at.timestamp_millis()),
            token_address: token_address.to_string(),
            token_symbol: token_symbol.to_string(),
            action,
            confidence,
            reason: reasons.join(", "),
            price,
            strategy: strategy.to_string(),
            created_at,
            executed: false,
        }
    }

    /// Mark the signal executed; returns false if it already was
    ///
    /// Idempotent guard against double execution.
    pub fn mark_executed(&mut self) -> bool {
        if self.executed {
            return false;
        }
        self.executed = true;
        true
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_creation() {
        let signal = Signal::new(
            "0xabc",
            "TEST",
            TradeAction::Buy,
            80,
            &["oversold", "bullish trend"],
            1.5,
            "momentum",
        );
        assert_eq!(signal.action, TradeAction::Buy);
        assert_eq!(signal.confidence, 80);
        assert_eq!(signal.reason, "oversold, bullish trend");
        assert!(!signal.is_executed());
    }

    #[test]
    fn test_mark_executed_is_set_once() {
        let mut signal =
            Signal::new("0xabc", "TEST", TradeAction::Buy, 70, &["oversold"], 1.0, "momentum");
        assert!(signal.mark_executed());
        assert!(!signal.mark_executed());
        assert!(signal.is_executed());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(TradeAction::Buy.to_string(), "BUY");
        assert_eq!(TradeAction::Sell.to_string(), "SELL");
        assert_eq!(TradeAction::Hold.to_string(), "HOLD");
    }
}
