//! Trading bot orchestrator.
//!
//! Owns all mutable state (portfolio, settings, caches, analytics) and runs
//! every cycle kind from a single task. Cycles have independent cadences but
//! execute sequentially from one `select` loop, so a trading pass can never
//! interleave with a risk pass over the same position.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::adapters::TokenDirectory;
use crate::analytics::{
    PerformanceTracker, PortfolioAnalytics, PortfolioMetrics, StrategyReport, StrategyTrade,
    TradeAnalysis,
};
use crate::domain::{
    BotSettings, ExitReason, IndicatorSet, MarketSnapshot, Portfolio, PortfolioError, RiskGate,
    SettingsError, SettingsUpdate, Signal, Token, Trade, TradeAction,
};
use crate::ports::{IndicatorProvider, MarketDataProvider, TokenDiscovery};
use crate::strategy::{LaunchScorer, MomentumScorer, EARLY_LAUNCH_WINDOW_MIN};

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Portfolio error: {0}")]
    Portfolio(#[from] PortfolioError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Cycle cadences in seconds
#[derive(Debug, Clone)]
pub struct CycleIntervals {
    pub refresh_secs: u64,
    pub trading_secs: u64,
    pub risk_secs: u64,
    pub analytics_secs: u64,
}

impl Default for CycleIntervals {
    fn default() -> Self {
        Self {
            refresh_secs: 30,
            trading_secs: 60,
            risk_secs: 15,
            analytics_secs: 300,
        }
    }
}

/// Paper trading bot
///
/// Providers are injected at construction; tests pass the deterministic
/// mocks from `ports::mocks` and drive the public cycle methods directly
/// instead of running the timer loop.
pub struct TradingBot {
    settings: RwLock<BotSettings>,
    portfolio: RwLock<Portfolio>,
    directory: TokenDirectory,
    /// Latest snapshot per token address, overwritten each refresh
    snapshots: RwLock<HashMap<String, MarketSnapshot>>,
    indicator_cache: RwLock<HashMap<String, IndicatorSet>>,
    tracker: RwLock<PerformanceTracker>,
    metrics: RwLock<PortfolioMetrics>,
    market_data: Arc<dyn MarketDataProvider>,
    indicators: Arc<dyn IndicatorProvider>,
    discovery: Arc<dyn TokenDiscovery>,
    momentum: MomentumScorer,
    launch: LaunchScorer,
    risk_gate: RiskGate,
    is_running: RwLock<bool>,
    /// Date of the last daily-loss reset
    loss_reset_date: RwLock<NaiveDate>,
}

impl TradingBot {
    pub fn new(
        initial_balance: f64,
        settings: BotSettings,
        market_data: Arc<dyn MarketDataProvider>,
        indicators: Arc<dyn IndicatorProvider>,
        discovery: Arc<dyn TokenDiscovery>,
    ) -> Self {
        Self {
            settings: RwLock::new(settings),
            portfolio: RwLock::new(Portfolio::new(initial_balance)),
            directory: TokenDirectory::new(),
            snapshots: RwLock::new(HashMap::new()),
            indicator_cache: RwLock::new(HashMap::new()),
            tracker: RwLock::new(PerformanceTracker::new()),
            metrics: RwLock::new(PortfolioMetrics::new()),
            market_data,
            indicators,
            discovery,
            momentum: MomentumScorer::default(),
            launch: LaunchScorer::default(),
            risk_gate: RiskGate,
            is_running: RwLock::new(false),
            loss_reset_date: RwLock::new(Utc::now().date_naive()),
        }
    }

    /// Discover new tokens and refresh snapshot/indicator caches
    pub async fn run_refresh_cycle(&self) -> Result<(), BotError> {
        let settings = self.settings.read().await.clone();
        if !settings.enabled {
            return Ok(());
        }

        let discovered = self.discovery.discover().await;
        let found = discovered.len();
        for token in discovered {
            self.directory.upsert(token, &settings);
        }

        let mut refreshed = 0usize;
        for token in self.directory.tradeable_tokens() {
            if let Some(snapshot) = self.market_data.snapshot(&token).await {
                let indicators = self.indicators.indicators(&token, &snapshot);
                self.indicator_cache
                    .write()
                    .await
                    .insert(token.address.clone(), indicators);
                self.snapshots
                    .write()
                    .await
                    .insert(token.address.clone(), snapshot);
                refreshed += 1;
            }
        }

        debug!(
            "Refresh cycle: {} discovered, {} snapshots refreshed, {} tracked",
            found,
            refreshed,
            self.directory.len()
        );
        Ok(())
    }

    /// Score tradeable tokens and execute admitted buy signals
    pub async fn run_trading_cycle(&self) -> Result<(), BotError> {
        let settings = self.settings.read().await.clone();
        if !settings.enabled {
            return Ok(());
        }

        let snapshots = self.snapshots.read().await.clone();
        let indicator_cache = self.indicator_cache.read().await.clone();

        for token in self.directory.tradeable_tokens() {
            // At most one open position per token
            if self.portfolio.read().await.position(&token.address).is_some() {
                continue;
            }

            let signal = match (snapshots.get(&token.address), indicator_cache.get(&token.address)) {
                (Some(snapshot), Some(indicators)) => {
                    self.momentum.score(&token, snapshot, indicators, &settings)
                }
                _ if token.age_minutes() < EARLY_LAUNCH_WINDOW_MIN => {
                    let known_price = snapshots.get(&token.address).map(|s| s.price);
                    self.launch.score(&token, known_price, &settings)
                }
                _ => None,
            };

            let Some(mut signal) = signal else { continue };
            if signal.action != TradeAction::Buy {
                continue;
            }

            self.execute_signal(&mut signal, &token, &settings).await?;
        }

        Ok(())
    }

    async fn execute_signal(
        &self,
        signal: &mut Signal,
        token: &Token,
        settings: &BotSettings,
    ) -> Result<(), BotError> {
        let investment = RiskGate::position_size(settings.max_investment, signal.confidence);

        let mut portfolio = self.portfolio.write().await;
        if self
            .risk_gate
            .admit(&portfolio, investment, token.price_change_24h)
            .is_err()
        {
            // Rejection reason already logged by the gate
            return Ok(());
        }

        if !signal.mark_executed() {
            return Ok(());
        }

        portfolio.apply_buy(&token.address, &token.symbol, investment, signal.price)?;
        drop(portfolio);

        self.tracker.write().await.record_entry(
            &signal.strategy,
            &token.address,
            &token.symbol,
            investment,
            signal.price,
            signal.confidence,
        );

        info!(
            "Signal executed: {} {} conf={} ({}) [{}]",
            signal.action, token.symbol, signal.confidence, signal.reason, signal.strategy
        );
        Ok(())
    }

    /// Check every open position against its stop-loss and take-profit levels
    ///
    /// Runs even while trading is disabled so open positions stay protected.
    pub async fn run_risk_cycle(&self) -> Result<(), BotError> {
        let settings = self.settings.read().await.clone();
        let prices = self.price_map().await;

        let exits: Vec<(String, f64, ExitReason)> = {
            let portfolio = self.portfolio.read().await;
            portfolio
                .positions()
                .filter_map(|pos| {
                    let &price = prices.get(&pos.token_address)?;
                    if price <= pos.stop_loss_price(settings.stop_loss_pct) {
                        Some((pos.token_address.clone(), price, ExitReason::StopLoss))
                    } else if price >= pos.take_profit_price(settings.take_profit_pct) {
                        Some((pos.token_address.clone(), price, ExitReason::TakeProfit))
                    } else {
                        None
                    }
                })
                .collect()
        };

        for (address, price, reason) in exits {
            let (_, pnl) = self
                .portfolio
                .write()
                .await
                .apply_sell(&address, price, reason)?;
            self.tracker.write().await.record_exit(&address, price);

            let total_value = self.portfolio.read().await.total_value;
            self.metrics.write().await.record(total_value, pnl, 1);
        }

        Ok(())
    }

    /// Revalue the portfolio, roll the daily-loss window, update metrics
    pub async fn run_analytics_cycle(&self) -> Result<(), BotError> {
        let prices = self.price_map().await;
        let mut portfolio = self.portfolio.write().await;
        portfolio.revalue(&prices);

        let today = Utc::now().date_naive();
        let mut reset_date = self.loss_reset_date.write().await;
        if *reset_date != today {
            portfolio.reset_daily_loss();
            *reset_date = today;
            info!("Daily loss window reset");
        }

        let total_value = portfolio.total_value;
        drop(portfolio);
        self.metrics.write().await.record(total_value, 0.0, 0);
        Ok(())
    }

    async fn price_map(&self) -> HashMap<String, f64> {
        self.snapshots
            .read()
            .await
            .iter()
            .map(|(address, snapshot)| (address.clone(), snapshot.price))
            .collect()
    }

    /// Run all cycles from one serialized loop until stopped
    pub async fn run(&self, intervals: CycleIntervals) {
        *self.is_running.write().await = true;
        info!(
            "Trading bot started (refresh {}s, trading {}s, risk {}s, analytics {}s)",
            intervals.refresh_secs,
            intervals.trading_secs,
            intervals.risk_secs,
            intervals.analytics_secs
        );

        let mut refresh = tokio::time::interval(Duration::from_secs(intervals.refresh_secs));
        let mut trading = tokio::time::interval(Duration::from_secs(intervals.trading_secs));
        let mut risk = tokio::time::interval(Duration::from_secs(intervals.risk_secs));
        let mut analytics = tokio::time::interval(Duration::from_secs(intervals.analytics_secs));

        while *self.is_running.read().await {
            // Each arm runs to completion before the next tick is taken,
            // so cycle kinds never overlap.
            tokio::select! {
                _ = refresh.tick() => {
                    if let Err(e) = self.run_refresh_cycle().await {
                        error!("Refresh cycle failed: {}", e);
                    }
                }
                _ = trading.tick() => {
                    if let Err(e) = self.run_trading_cycle().await {
                        error!("Trading cycle failed: {}", e);
                    }
                }
                _ = risk.tick() => {
                    if let Err(e) = self.run_risk_cycle().await {
                        error!("Risk cycle failed: {}", e);
                    }
                }
                _ = analytics.tick() => {
                    if let Err(e) = self.run_analytics_cycle().await {
                        error!("Analytics cycle failed: {}", e);
                    }
                }
            }
        }

        info!("Trading bot stopped");
    }

    pub async fn stop(&self) {
        *self.is_running.write().await = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    /// Apply a partial settings update; directory flags are refreshed on success
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<(), BotError> {
        let mut settings = self.settings.write().await;
        update.apply(&mut settings)?;
        self.directory.refresh_flags(&settings);
        Ok(())
    }

    pub async fn settings(&self) -> BotSettings {
        self.settings.read().await.clone()
    }

    pub async fn portfolio(&self) -> Portfolio {
        self.portfolio.read().await.clone()
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.directory.all_tokens()
    }

    pub async fn recent_trades(&self) -> Vec<Trade> {
        self.portfolio.read().await.recent_trades().cloned().collect()
    }

    pub async fn trade_analysis(&self) -> TradeAnalysis {
        self.tracker.read().await.trade_analysis()
    }

    pub async fn strategy_reports(&self) -> Vec<StrategyReport> {
        self.tracker.read().await.strategy_reports()
    }

    pub async fn strategy_history(&self) -> Vec<StrategyTrade> {
        self.tracker.read().await.recent().to_vec()
    }

    pub async fn portfolio_analytics(&self) -> PortfolioAnalytics {
        self.metrics.read().await.analytics()
    }
}
