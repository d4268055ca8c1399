//! Application Layer - Trading bot orchestration

pub mod bot;

pub use bot::{BotError, CycleIntervals, TradingBot};
