//! Open positions with weighted-average cost accounting.
//!
//! Position amounts are denominated in invested currency units, not token
//! quantity. All PnL formulas in this crate use the matching convention:
//! `unrealized = amount * price / avg_price - amount`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open position in one token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Token address
    pub token_address: String,
    /// Token symbol
    pub symbol: String,
    /// Invested amount in currency units
    pub amount: f64,
    /// Cost-weighted average entry price
    pub avg_price: f64,
    /// Unrealized PnL as of the last revaluation
    pub unrealized_pnl: f64,
    /// Number of buys merged into this position
    pub buy_count: u32,
    /// First entry timestamp
    pub opened_at: DateTime<Utc>,
}

impl Position {
    pub fn new(token_address: &str, symbol: &str, amount: f64, price: f64) -> Self {
        Self {
            token_address: token_address.to_string(),
            symbol: symbol.to_string(),
            amount,
            avg_price: price,
            unrealized_pnl: 0.0,
            buy_count: 1,
            opened_at: Utc::now(),
        }
    }

    /// Merge an additional buy via weighted-average cost
    ///
    /// `amount` and `avg_price` always move together; a token never holds
    /// more than one position.
    pub fn add(&mut self, amount: f64, price: f64) {
        let new_amount = self.amount + amount;
        self.avg_price = (self.avg_price * self.amount + price * amount) / new_amount;
        self.amount = new_amount;
        self.buy_count += 1;
    }

    /// Unrealized PnL at the given price, currency-denominated convention
    pub fn unrealized_at(&self, price: f64) -> f64 {
        self.amount * price / self.avg_price - self.amount
    }

    /// Realized PnL if fully exited at the given price
    pub fn realized_at(&self, price: f64) -> f64 {
        (price - self.avg_price) * (self.amount / self.avg_price)
    }

    /// Price at which the stop loss fires
    pub fn stop_loss_price(&self, stop_loss_pct: f64) -> f64 {
        self.avg_price * (1.0 - stop_loss_pct / 100.0)
    }

    /// Price at which the take profit fires
    pub fn take_profit_price(&self, take_profit_pct: f64) -> f64 {
        self.avg_price * (1.0 + take_profit_pct / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weighted_average_cost() {
        // Buy $100 at $2, then $50 at $4 -> avg (100*2+50*4)/150 = 2.667
        let mut pos = Position::new("0xabc", "TEST", 100.0, 2.0);
        pos.add(50.0, 4.0);
        assert_relative_eq!(pos.avg_price, 400.0 / 150.0, epsilon = 1e-9);
        assert_relative_eq!(pos.amount, 150.0, epsilon = 1e-9);
        assert_eq!(pos.buy_count, 2);
    }

    #[test]
    fn test_unrealized_pnl_currency_convention() {
        let pos = Position::new("0xabc", "TEST", 100.0, 2.0);
        // Price doubles: 100 * 4/2 - 100 = 100
        assert_relative_eq!(pos.unrealized_at(4.0), 100.0, epsilon = 1e-9);
        // Price halves: 100 * 1/2 - 100 = -50
        assert_relative_eq!(pos.unrealized_at(1.0), -50.0, epsilon = 1e-9);
        // Unchanged price: zero
        assert_relative_eq!(pos.unrealized_at(2.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_realized_pnl_formula() {
        let pos = Position::new("0xabc", "TEST", 100.0, 2.0);
        // (3 - 2) * (100 / 2) = 50
        assert_relative_eq!(pos.realized_at(3.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_exit_price_levels() {
        let pos = Position::new("0xabc", "TEST", 100.0, 2.0);
        assert_relative_eq!(pos.stop_loss_price(10.0), 1.8, epsilon = 1e-9);
        assert_relative_eq!(pos.take_profit_price(25.0), 2.5, epsilon = 1e-9);
        // With positive stop/take percentages the two levels cannot overlap
        assert!(pos.stop_loss_price(10.0) < pos.take_profit_price(25.0));
    }
}
