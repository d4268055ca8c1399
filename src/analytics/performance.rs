//! Strategy trade records and trade analysis.
//!
//! Every executed entry opens an `Active` record; the matching exit enriches
//! it with PnL and an outcome tag. Records are append-only and the trade log
//! itself is never rewritten, so exit enrichment happens here rather than on
//! the ledger's `Trade` rows.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// PnL percentage above which a closed trade counts as a win
pub const WIN_THRESHOLD_PCT: f64 = 5.0;

/// PnL percentage below which a closed trade counts as a loss
pub const LOSS_THRESHOLD_PCT: f64 = -5.0;

/// Retention window served by the history getter
pub const HISTORY_WINDOW: usize = 100;

/// Outcome tag assigned when a strategy trade closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOutcome {
    Win,
    Loss,
    Breakeven,
    /// Position still open
    Active,
}

impl TradeOutcome {
    fn from_pnl_pct(pnl_pct: f64) -> Self {
        if pnl_pct > WIN_THRESHOLD_PCT {
            TradeOutcome::Win
        } else if pnl_pct < LOSS_THRESHOLD_PCT {
            TradeOutcome::Loss
        } else {
            TradeOutcome::Breakeven
        }
    }
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Win => write!(f, "WIN"),
            TradeOutcome::Loss => write!(f, "LOSS"),
            TradeOutcome::Breakeven => write!(f, "BREAKEVEN"),
            TradeOutcome::Active => write!(f, "ACTIVE"),
        }
    }
}

/// One strategy trade from entry to (eventual) exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyTrade {
    pub id: u64,
    /// Originating strategy name
    pub strategy: String,
    pub token_address: String,
    pub symbol: String,
    /// Invested amount in currency units
    pub amount: f64,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    /// Signal confidence at entry
    pub confidence: u8,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    /// Realized PnL in currency units, set at exit
    pub pnl: Option<f64>,
    /// Realized PnL percentage, set at exit
    pub pnl_pct: Option<f64>,
    pub outcome: TradeOutcome,
}

impl StrategyTrade {
    /// Holding duration in seconds, None while open
    pub fn duration_secs(&self) -> Option<i64> {
        self.exit_time
            .map(|exit| exit.signed_duration_since(self.entry_time).num_seconds())
    }
}

/// Aggregate view over closed trades
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeAnalysis {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub total_win: f64,
    pub total_loss: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    /// avg win / avg loss; zero when there are no losses
    pub profit_factor: f64,
    /// Strategy with the highest summed PnL
    pub best_strategy: Option<String>,
    /// Strategy with the lowest summed PnL
    pub worst_strategy: Option<String>,
}

/// Per-strategy aggregate, ranked by profitability score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy: String,
    pub closed_trades: usize,
    /// Win rate as a percentage, 0-100
    pub win_rate: f64,
    /// Average PnL percentage across closed trades
    pub avg_pnl_pct: f64,
    /// Max drawdown over this strategy's own cumulative PnL sequence
    pub max_drawdown_pct: f64,
    /// `avg_pnl_pct * win_rate` when positive, else zero
    pub score: f64,
}

/// Append-only tracker of strategy trades
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceTracker {
    history: Vec<StrategyTrade>,
    next_id: u64,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self { history: Vec::new(), next_id: 1 }
    }

    /// Record an entry; returns the new record id
    pub fn record_entry(
        &mut self,
        strategy: &str,
        token_address: &str,
        symbol: &str,
        amount: f64,
        entry_price: f64,
        confidence: u8,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.history.push(StrategyTrade {
            id,
            strategy: strategy.to_string(),
            token_address: token_address.to_string(),
            symbol: symbol.to_string(),
            amount,
            entry_price,
            exit_price: None,
            confidence,
            entry_time: Utc::now(),
            exit_time: None,
            pnl: None,
            pnl_pct: None,
            outcome: TradeOutcome::Active,
        });
        id
    }

    /// Close the most recent active record for a token
    ///
    /// Returns the assigned outcome, or None when no active record exists
    /// (an exit the tracker never saw the entry for).
    pub fn record_exit(&mut self, token_address: &str, exit_price: f64) -> Option<TradeOutcome> {
        let record = self
            .history
            .iter_mut()
            .rev()
            .find(|t| t.token_address == token_address && t.outcome == TradeOutcome::Active)?;

        let pnl_pct = if record.entry_price > 0.0 {
            (exit_price - record.entry_price) / record.entry_price * 100.0
        } else {
            0.0
        };
        let pnl = record.amount * exit_price / record.entry_price - record.amount;

        record.exit_price = Some(exit_price);
        record.exit_time = Some(Utc::now());
        record.pnl = Some(pnl);
        record.pnl_pct = Some(pnl_pct);
        record.outcome = TradeOutcome::from_pnl_pct(pnl_pct);

        debug!(
            "Strategy exit: {} {} {:.2}% -> {}",
            record.strategy, record.symbol, pnl_pct, record.outcome
        );
        Some(record.outcome)
    }

    /// Most recent records, oldest first, bounded by the retention window
    pub fn recent(&self) -> &[StrategyTrade] {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        &self.history[start..]
    }

    pub fn open_trades(&self) -> impl Iterator<Item = &StrategyTrade> {
        self.history.iter().filter(|t| t.outcome == TradeOutcome::Active)
    }

    fn closed(&self) -> impl Iterator<Item = &StrategyTrade> {
        self.history.iter().filter(|t| t.outcome != TradeOutcome::Active)
    }

    /// Aggregate counts, magnitudes, profit factor, best/worst strategy
    pub fn trade_analysis(&self) -> TradeAnalysis {
        let mut analysis = TradeAnalysis::default();
        let mut per_strategy: HashMap<&str, f64> = HashMap::new();

        for trade in self.closed() {
            let pnl = trade.pnl.unwrap_or(0.0);
            analysis.total_trades += 1;
            match trade.outcome {
                TradeOutcome::Win => {
                    analysis.wins += 1;
                    analysis.total_win += pnl;
                }
                TradeOutcome::Loss => {
                    analysis.losses += 1;
                    analysis.total_loss += pnl.abs();
                }
                TradeOutcome::Breakeven => analysis.breakevens += 1,
                TradeOutcome::Active => unreachable!("closed() filters active trades"),
            }
            *per_strategy.entry(trade.strategy.as_str()).or_insert(0.0) += pnl;
        }

        if analysis.wins > 0 {
            analysis.avg_win = analysis.total_win / analysis.wins as f64;
        }
        if analysis.losses > 0 {
            analysis.avg_loss = analysis.total_loss / analysis.losses as f64;
            analysis.profit_factor = if analysis.avg_loss > 0.0 {
                analysis.avg_win / analysis.avg_loss
            } else {
                0.0
            };
        }

        analysis.best_strategy = per_strategy
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, _)| name.to_string());
        analysis.worst_strategy = per_strategy
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(name, _)| name.to_string());

        analysis
    }

    /// Per-strategy reports sorted descending by profitability score
    pub fn strategy_reports(&self) -> Vec<StrategyReport> {
        let mut grouped: HashMap<&str, Vec<&StrategyTrade>> = HashMap::new();
        for trade in self.closed() {
            grouped.entry(trade.strategy.as_str()).or_default().push(trade);
        }

        let mut reports: Vec<StrategyReport> = grouped
            .into_iter()
            .map(|(strategy, trades)| {
                let closed_trades = trades.len();
                let wins = trades.iter().filter(|t| t.outcome == TradeOutcome::Win).count();
                let win_rate = wins as f64 / closed_trades as f64 * 100.0;
                let avg_pnl_pct = trades.iter().filter_map(|t| t.pnl_pct).sum::<f64>()
                    / closed_trades as f64;
                let max_drawdown_pct = drawdown_scan(trades.iter().filter_map(|t| t.pnl));
                let score = if avg_pnl_pct > 0.0 { avg_pnl_pct * win_rate } else { 0.0 };

                StrategyReport {
                    strategy: strategy.to_string(),
                    closed_trades,
                    win_rate,
                    avg_pnl_pct,
                    max_drawdown_pct,
                    score,
                }
            })
            .collect();

        reports.sort_by(|a, b| b.score.total_cmp(&a.score));
        reports
    }
}

/// Max percentage decline from a running peak over a cumulative PnL sequence
fn drawdown_scan(pnls: impl Iterator<Item = f64>) -> f64 {
    let mut running = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;
    for pnl in pnls {
        running += pnl;
        if running > peak {
            peak = running;
        } else if peak > 0.0 {
            let dd = (peak - running) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}
