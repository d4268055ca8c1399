//! Risk gate and position sizing.
//!
//! The gate is a pure predicate evaluated immediately before order placement.
//! All checks must pass (short-circuit AND); a failed check logs the reason
//! and the signal is dropped. Rejection is expected control flow, not an
//! error condition.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::domain::portfolio::Portfolio;

/// Fixed daily cumulative loss ceiling in currency units
pub const DAILY_LOSS_CEILING: f64 = 500.0;

/// Maximum fraction of total portfolio value per position
pub const MAX_PORTFOLIO_FRACTION: f64 = 0.10;

/// Maximum absolute 24h price change admitted, in percent
pub const MAX_PRICE_SWING_PCT: f64 = 50.0;

/// Fixed volatility adjustment applied to position sizing
pub const VOLATILITY_ADJUSTMENT: f64 = 1.0;

/// Why the gate rejected a signal
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskRejection {
    #[error("Daily loss {0:.2} at or above ceiling {1:.2}")]
    DailyLossLimit(f64, f64),

    #[error("Investment {need:.2} exceeds available balance {have:.2}")]
    InsufficientBalance { need: f64, have: f64 },

    #[error("Investment {0:.2} exceeds {1:.0}% of portfolio value {2:.2}")]
    PositionTooLarge(f64, f64, f64),

    #[error("24h price change {0:.1}% exceeds volatility ceiling {1:.0}%")]
    ExcessiveVolatility(f64, f64),
}

/// Admission gate run before every order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskGate;

impl RiskGate {
    /// Size a position from settings and signal confidence
    pub fn position_size(max_investment: f64, confidence: u8) -> f64 {
        max_investment * (confidence as f64 / 100.0) * VOLATILITY_ADJUSTMENT
    }

    /// Admit or reject an order of `investment` currency units
    ///
    /// Pure predicate: no state is mutated, the only side effect is
    /// diagnostic logging on the first failed check.
    pub fn admit(
        &self,
        portfolio: &Portfolio,
        investment: f64,
        price_change_24h: f64,
    ) -> Result<(), RiskRejection> {
        if portfolio.daily_loss >= DAILY_LOSS_CEILING {
            let rejection = RiskRejection::DailyLossLimit(portfolio.daily_loss, DAILY_LOSS_CEILING);
            warn!("Risk gate: {}", rejection);
            return Err(rejection);
        }

        if investment > portfolio.available_balance {
            let rejection = RiskRejection::InsufficientBalance {
                need: investment,
                have: portfolio.available_balance,
            };
            warn!("Risk gate: {}", rejection);
            return Err(rejection);
        }

        let max_position = portfolio.total_value * MAX_PORTFOLIO_FRACTION;
        if investment > max_position {
            let rejection = RiskRejection::PositionTooLarge(
                investment,
                MAX_PORTFOLIO_FRACTION * 100.0,
                portfolio.total_value,
            );
            warn!("Risk gate: {}", rejection);
            return Err(rejection);
        }

        if price_change_24h.abs() > MAX_PRICE_SWING_PCT {
            let rejection =
                RiskRejection::ExcessiveVolatility(price_change_24h, MAX_PRICE_SWING_PCT);
            warn!("Risk gate: {}", rejection);
            return Err(rejection);
        }

        Ok(())
    }
}
