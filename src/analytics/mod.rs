//! Performance tracking and portfolio analytics.

pub mod performance;
pub mod portfolio_metrics;

pub use performance::{
    PerformanceTracker, StrategyReport, StrategyTrade, TradeAnalysis, TradeOutcome,
    HISTORY_WINDOW, LOSS_THRESHOLD_PCT, WIN_THRESHOLD_PCT,
};
pub use portfolio_metrics::{
    DailyMetric, PortfolioAnalytics, PortfolioMetrics, DAILY_METRICS_RETENTION_DAYS,
};
