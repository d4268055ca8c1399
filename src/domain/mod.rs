//! Domain Layer - Core business logic for the tokenscout bot
//!
//! Pure domain types and logic with no external dependencies. All external
//! interactions happen through the ports layer.

pub mod token;
pub mod snapshot;
pub mod signal;
pub mod position;
pub mod trade;
pub mod portfolio;
pub mod risk;
pub mod settings;

pub use token::{Token, HIGH_ALERT_LIQUIDITY_MULT, HIGH_ALERT_MIN_MENTIONS};
pub use snapshot::{IndicatorSet, MarketSnapshot, BOLLINGER_OFFSET, SYNTHETIC_SPREAD};
pub use signal::{Signal, TradeAction};
pub use position::Position;
pub use trade::{ExitReason, Trade, TradeStatus};
pub use portfolio::{Portfolio, PortfolioError, TRADE_HISTORY_WINDOW};
pub use risk::{RiskGate, RiskRejection, DAILY_LOSS_CEILING, MAX_PORTFOLIO_FRACTION, MAX_PRICE_SWING_PCT};
pub use settings::{BotSettings, SettingsError, SettingsUpdate};
