//! Rolling daily portfolio metrics.
//!
//! One `DailyMetric` per calendar day, retained for a bounded window. The
//! window feeds the period PnL sums, the simplified Sharpe ratio, and the
//! value-series drawdown scan.

use std::collections::VecDeque;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Days of daily metrics kept in the rolling window
pub const DAILY_METRICS_RETENTION_DAYS: usize = 30;

const WEEK_DAYS: usize = 7;
const MONTH_DAYS: usize = 30;

/// End-of-day portfolio snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: NaiveDate,
    /// Total portfolio value at last record of the day
    pub total_value: f64,
    /// PnL realized during the day
    pub pnl: f64,
    /// Trades closed during the day
    pub trades: usize,
}

/// Summary derived from the daily series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioAnalytics {
    pub daily_pnl: f64,
    pub weekly_pnl: f64,
    pub monthly_pnl: f64,
    /// mean / stddev of daily PnL; zero when the series has no variance
    pub sharpe_ratio: f64,
    /// Max percentage decline from a running value peak
    pub max_drawdown_pct: f64,
}

/// Bounded series of daily metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    series: VecDeque<DailyMetric>,
}

impl PortfolioMetrics {
    pub fn new() -> Self {
        Self { series: VecDeque::new() }
    }

    /// Fold a realized PnL delta and current value into today's metric
    ///
    /// Creates today's entry on first call of the day and evicts entries
    /// beyond the retention window.
    pub fn record(&mut self, total_value: f64, pnl_delta: f64, trades_delta: usize) {
        let today = Utc::now().date_naive();
        self.record_on(today, total_value, pnl_delta, trades_delta);
    }

    fn record_on(&mut self, date: NaiveDate, total_value: f64, pnl_delta: f64, trades_delta: usize) {
        match self.series.back_mut() {
            Some(last) if last.date == date => {
                last.total_value = total_value;
                last.pnl += pnl_delta;
                last.trades += trades_delta;
            }
            _ => {
                self.series.push_back(DailyMetric {
                    date,
                    total_value,
                    pnl: pnl_delta,
                    trades: trades_delta,
                });
                while self.series.len() > DAILY_METRICS_RETENTION_DAYS {
                    self.series.pop_front();
                }
            }
        }
    }

    pub fn series(&self) -> impl Iterator<Item = &DailyMetric> {
        self.series.iter()
    }

    /// Sum of PnL over the last `days` entries
    fn period_pnl(&self, days: usize) -> f64 {
        self.series.iter().rev().take(days).map(|m| m.pnl).sum()
    }

    /// Simplified Sharpe: mean daily PnL over its standard deviation
    fn sharpe_ratio(&self) -> f64 {
        let n = self.series.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.series.iter().map(|m| m.pnl).sum::<f64>() / n as f64;
        let variance = self
            .series
            .iter()
            .map(|m| (m.pnl - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        if variance == 0.0 {
            return 0.0;
        }
        mean / variance.sqrt()
    }

    /// Peak-scan drawdown over the daily value series
    fn max_drawdown_pct(&self) -> f64 {
        let mut peak = 0.0_f64;
        let mut max_dd = 0.0_f64;
        for metric in &self.series {
            if metric.total_value > peak {
                peak = metric.total_value;
            } else if peak > 0.0 {
                let dd = (peak - metric.total_value) / peak * 100.0;
                if dd > max_dd {
                    max_dd = dd;
                }
            }
        }
        max_dd
    }

    pub fn analytics(&self) -> PortfolioAnalytics {
        PortfolioAnalytics {
            daily_pnl: self.period_pnl(1),
            weekly_pnl: self.period_pnl(WEEK_DAYS),
            monthly_pnl: self.period_pnl(MONTH_DAYS),
            sharpe_ratio: self.sharpe_ratio(),
            max_drawdown_pct: self.max_drawdown_pct(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        Utc::now().date_naive() - Duration::days(offset)
    }

    #[test]
    fn test_same_day_records_merge() {
        let mut metrics = PortfolioMetrics::new();
        metrics.record(1000.0, 10.0, 1);
        metrics.record(1050.0, 40.0, 2);

        let series: Vec<_> = metrics.series().collect();
        assert_eq!(series.len(), 1);
        assert_relative_eq!(series[0].pnl, 50.0, epsilon = 1e-9);
        assert_relative_eq!(series[0].total_value, 1050.0, epsilon = 1e-9);
        assert_eq!(series[0].trades, 3);
    }

    #[test]
    fn test_retention_window() {
        let mut metrics = PortfolioMetrics::new();
        for offset in (0..40).rev() {
            metrics.record_on(day(offset), 1000.0, 1.0, 0);
        }
        assert_eq!(metrics.series().count(), DAILY_METRICS_RETENTION_DAYS);
        // Oldest surviving entry is 29 days back
        assert_eq!(metrics.series().next().unwrap().date, day(29));
    }

    #[test]
    fn test_period_pnl_sums() {
        let mut metrics = PortfolioMetrics::new();
        for offset in (0..10).rev() {
            metrics.record_on(day(offset), 1000.0, 10.0, 1);
        }
        let analytics = metrics.analytics();
        assert_relative_eq!(analytics.daily_pnl, 10.0, epsilon = 1e-9);
        assert_relative_eq!(analytics.weekly_pnl, 70.0, epsilon = 1e-9);
        assert_relative_eq!(analytics.monthly_pnl, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sharpe_zero_on_constant_series() {
        let mut metrics = PortfolioMetrics::new();
        for offset in (0..5).rev() {
            metrics.record_on(day(offset), 1000.0, 10.0, 0);
        }
        assert_eq!(metrics.analytics().sharpe_ratio, 0.0);
    }

    #[test]
    fn test_sharpe_positive_on_mostly_winning_series() {
        let mut metrics = PortfolioMetrics::new();
        let pnls = [10.0, 20.0, -5.0, 15.0];
        for (i, pnl) in pnls.iter().enumerate() {
            metrics.record_on(day((pnls.len() - 1 - i) as i64), 1000.0, *pnl, 0);
        }
        assert!(metrics.analytics().sharpe_ratio > 0.0);
    }

    #[test]
    fn test_max_drawdown_over_value_series() {
        let mut metrics = PortfolioMetrics::new();
        let values = [1000.0, 1200.0, 600.0, 900.0];
        for (i, value) in values.iter().enumerate() {
            metrics.record_on(day((values.len() - 1 - i) as i64), *value, 0.0, 0);
        }
        // 1200 -> 600 is a 50% decline
        assert_relative_eq!(metrics.analytics().max_drawdown_pct, 50.0, epsilon = 1e-9);
    }
}
