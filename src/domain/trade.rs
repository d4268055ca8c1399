//! Trade records.
//!
//! The trade log is append-only: records are never mutated after creation.
//! Exit enrichment (PnL, outcome tagging) lives on the analytics side.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::signal::TradeAction;

/// Trade lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Pending => write!(f, "PENDING"),
            TradeStatus::Completed => write!(f, "COMPLETED"),
            TradeStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Why a position was force-exited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// Price fell to or below the stop-loss level
    StopLoss,
    /// Price rose to or above the take-profit level
    TakeProfit,
    /// Operator-requested exit
    Manual,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::StopLoss => write!(f, "STOP_LOSS"),
            ExitReason::TakeProfit => write!(f, "TAKE_PROFIT"),
            ExitReason::Manual => write!(f, "MANUAL"),
        }
    }
}

/// A single executed trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Sequential trade id
    pub id: u64,
    /// Token address
    pub token_address: String,
    /// Token symbol
    pub symbol: String,
    /// Buy or sell
    pub action: TradeAction,
    /// Amount in currency units
    pub amount: f64,
    /// Execution price
    pub price: f64,
    /// Status at creation (simulated fills complete immediately)
    pub status: TradeStatus,
    /// Execution timestamp
    pub executed_at: DateTime<Utc>,
    /// Exit tag, sells only
    pub exit_reason: Option<ExitReason>,
}

impl Trade {
    pub fn buy(id: u64, token_address: &str, symbol: &str, amount: f64, price: f64) -> Self {
        Self {
            id,
            token_address: token_address.to_string(),
            symbol: symbol.to_string(),
            action: TradeAction::Buy,
            amount,
            price,
            status: TradeStatus::Completed,
            executed_at: Utc::now(),
            exit_reason: None,
        }
    }

    pub fn sell(
        id: u64,
        token_address: &str,
        symbol: &str,
        amount: f64,
        price: f64,
        reason: ExitReason,
    ) -> Self {
        Self {
            id,
            token_address: token_address.to_string(),
            symbol: symbol.to_string(),
            action: TradeAction::Sell,
            amount,
            price,
            status: TradeStatus::Completed,
            executed_at: Utc::now(),
            exit_reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_record() {
        let trade = Trade::buy(1, "0xabc", "TEST", 100.0, 2.0);
        assert_eq!(trade.action, TradeAction::Buy);
        assert_eq!(trade.status, TradeStatus::Completed);
        assert!(trade.exit_reason.is_none());
    }

    #[test]
    fn test_sell_record_carries_exit_tag() {
        let trade = Trade::sell(2, "0xabc", "TEST", 100.0, 1.8, ExitReason::StopLoss);
        assert_eq!(trade.action, TradeAction::Sell);
        assert_eq!(trade.exit_reason, Some(ExitReason::StopLoss));
    }

    #[test]
    fn test_exit_reason_display() {
        assert_eq!(ExitReason::StopLoss.to_string(), "STOP_LOSS");
        assert_eq!(ExitReason::TakeProfit.to_string(), "TAKE_PROFIT");
        assert_eq!(ExitReason::Manual.to_string(), "MANUAL");
    }
}
