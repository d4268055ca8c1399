//! Portfolio ledger.
//!
//! In-memory record of balances, weighted-average-cost positions, realized
//! and unrealized PnL, and recent trade history. Mutated only by buy/sell
//! execution and the periodic revaluation pass; process restart loses all
//! state by design.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::position::Position;
use crate::domain::trade::{ExitReason, Trade};

/// Retention window for the trade-history ring buffer
pub const TRADE_HISTORY_WINDOW: usize = 100;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Insufficient balance: have {have:.2}, need {need:.2}")]
    InsufficientBalance { have: f64, need: f64 },

    #[error("No open position for token {0}")]
    NoPosition(String),

    #[error("Invalid trade input: {0}")]
    InvalidInput(String),
}

/// Aggregate portfolio state, one instance per bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// Total value: balance plus positions at last revaluation
    pub total_value: f64,
    /// Available (uninvested) balance
    pub available_balance: f64,
    /// Open positions keyed by token address, at most one per token
    positions: HashMap<String, Position>,
    /// Cumulative realized profit
    pub total_profit: f64,
    /// Open position count
    pub active_trades: u32,
    /// Accumulated losses since the last daily reset
    pub daily_loss: f64,
    /// Peak total value observed, for drawdown tracking
    peak_value: f64,
    /// Maximum percentage decline from peak
    pub max_drawdown_pct: f64,
    /// Recent trades, bounded ring buffer
    trades: VecDeque<Trade>,
    /// Next trade id
    next_trade_id: u64,
    /// Last revaluation timestamp
    pub revalued_at: Option<DateTime<Utc>>,
}

impl Portfolio {
    pub fn new(initial_balance: f64) -> Self {
        Self {
            total_value: initial_balance,
            available_balance: initial_balance,
            positions: HashMap::new(),
            total_profit: 0.0,
            active_trades: 0,
            daily_loss: 0.0,
            peak_value: initial_balance,
            max_drawdown_pct: 0.0,
            trades: VecDeque::with_capacity(TRADE_HISTORY_WINDOW),
            next_trade_id: 1,
            revalued_at: None,
        }
    }

    /// Execute a buy: debit balance and merge into the token's position
    ///
    /// Repeated buys of the same token merge via weighted-average cost;
    /// a second position entry is never created.
    pub fn apply_buy(
        &mut self,
        token_address: &str,
        symbol: &str,
        amount: f64,
        price: f64,
    ) -> Result<Trade, PortfolioError> {
        if amount <= 0.0 {
            return Err(PortfolioError::InvalidInput("amount must be positive".into()));
        }
        if price <= 0.0 {
            return Err(PortfolioError::InvalidInput("price must be positive".into()));
        }
        if amount > self.available_balance {
            return Err(PortfolioError::InsufficientBalance {
                have: self.available_balance,
                need: amount,
            });
        }

        self.available_balance -= amount;

        match self.positions.get_mut(token_address) {
            Some(pos) => pos.add(amount, price),
            None => {
                self.positions
                    .insert(token_address.to_string(), Position::new(token_address, symbol, amount, price));
                self.active_trades += 1;
            }
        }

        let trade = Trade::buy(self.next_trade_id, token_address, symbol, amount, price);
        self.next_trade_id += 1;
        self.push_trade(trade.clone());

        info!(
            "[PAPER] BUY {} {:.2} @ {:.8} (balance {:.2})",
            symbol, amount, price, self.available_balance
        );

        Ok(trade)
    }

    /// Execute a full exit: realize PnL, credit balance, drop the position
    ///
    /// Realized PnL follows the currency-denominated convention:
    /// `(sell_price - avg_price) * amount / avg_price`.
    pub fn apply_sell(
        &mut self,
        token_address: &str,
        price: f64,
        reason: ExitReason,
    ) -> Result<(Trade, f64), PortfolioError> {
        if price <= 0.0 {
            return Err(PortfolioError::InvalidInput("price must be positive".into()));
        }

        let pos = self
            .positions
            .remove(token_address)
            .ok_or_else(|| PortfolioError::NoPosition(token_address.to_string()))?;

        let pnl = pos.realized_at(price);
        self.available_balance += pos.amount + pnl;
        self.total_profit += pnl;
        self.active_trades = self.active_trades.saturating_sub(1);
        if pnl < 0.0 {
            self.daily_loss += -pnl;
        }

        let trade = Trade::sell(self.next_trade_id, token_address, &pos.symbol, pos.amount, price, reason);
        self.next_trade_id += 1;
        self.push_trade(trade.clone());

        let sign = if pnl >= 0.0 { "+" } else { "" };
        info!(
            "[PAPER] SELL {} {:.2} @ {:.8} | PnL: {}{:.2} ({})",
            pos.symbol, pos.amount, price, sign, pnl, reason
        );

        Ok((trade, pnl))
    }

    /// Revalue all positions with known current prices
    ///
    /// Idempotent: two passes with unchanged prices yield the same total.
    /// Positions without a price keep their last unrealized PnL.
    pub fn revalue(&mut self, prices: &HashMap<String, f64>) {
        for (address, pos) in self.positions.iter_mut() {
            if let Some(&price) = prices.get(address) {
                pos.unrealized_pnl = pos.unrealized_at(price);
            }
        }

        let invested: f64 = self
            .positions
            .values()
            .map(|p| p.amount + p.unrealized_pnl)
            .sum();
        self.total_value = self.available_balance + invested;
        self.revalued_at = Some(Utc::now());

        if self.total_value > self.peak_value {
            self.peak_value = self.total_value;
        } else if self.peak_value > 0.0 {
            let drawdown = (self.peak_value - self.total_value) / self.peak_value * 100.0;
            if drawdown > self.max_drawdown_pct {
                self.max_drawdown_pct = drawdown;
            }
        }
    }

    /// Reset the daily loss accumulator (called on day rollover)
    pub fn reset_daily_loss(&mut self) {
        self.daily_loss = 0.0;
    }

    pub fn position(&self, token_address: &str) -> Option<&Position> {
        self.positions.get(token_address)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Recent trades, oldest first, bounded by the retention window
    pub fn recent_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }

    fn push_trade(&mut self, trade: Trade) {
        if self.trades.len() == TRADE_HISTORY_WINDOW {
            self.trades.pop_front();
        }
        self.trades.push_back(trade);
    }
}
