//! End-to-end cycle tests over deterministic providers.
//!
//! Drives the bot's public cycle methods directly, the same way the timer
//! loop does, and asserts on the full path from discovery through scoring,
//! admission, the ledger, forced exits, and analytics.

use std::sync::Arc;

use chrono::{Duration, Utc};

use tokenscout::analytics::TradeOutcome;
use tokenscout::application::TradingBot;
use tokenscout::domain::{
    BotSettings, ExitReason, IndicatorSet, MarketSnapshot, Token, TradeAction,
};
use tokenscout::ports::mocks::{FixedDiscovery, FixedIndicators, FixedMarketData};
use tokenscout::strategy::estimate_token_price;

fn hot_token(address: &str, symbol: &str) -> Token {
    let mut token = Token::new(address, "Hot Token", symbol, "solana");
    token.liquidity = 50_000.0;
    token.holders = 200;
    token.volume_24h = 100_000.0;
    token.price_change_24h = 10.0;
    token.social_mentions = 40;
    token.launched_at = Utc::now() - Duration::minutes(20);
    token
}

fn bullish_indicators(price: f64) -> IndicatorSet {
    let mut indicators = IndicatorSet::neutral(price, 100_000.0);
    indicators.rsi = 25.0;
    indicators.sma_20 = price * 0.95;
    indicators.sma_50 = price * 0.90;
    indicators.macd = 0.01;
    indicators.macd_signal = 0.005;
    indicators.macd_histogram = 0.005;
    indicators.volume_profile = 40_000.0;
    indicators
}

fn enabled_settings() -> BotSettings {
    BotSettings {
        enabled: true,
        ..BotSettings::default()
    }
}

fn bot(
    balance: f64,
    market_data: FixedMarketData,
    indicators: FixedIndicators,
    discovery: FixedDiscovery,
) -> TradingBot {
    TradingBot::new(
        balance,
        enabled_settings(),
        Arc::new(market_data),
        Arc::new(indicators),
        Arc::new(discovery),
    )
}

#[tokio::test]
async fn momentum_entry_take_profit_exit_and_analytics() {
    // First refresh serves the entry price, the second a rally past the
    // 25% take-profit level.
    let market_data = FixedMarketData::new()
        .with_snapshot("0xhot", MarketSnapshot::new(1.0, 100_000.0, 10.0, 1_000_000.0))
        .with_snapshot("0xhot", MarketSnapshot::new(1.30, 100_000.0, 30.0, 1_000_000.0));
    let indicators = FixedIndicators::new().with_indicators("0xhot", bullish_indicators(1.0));
    let discovery = FixedDiscovery::new().with_batch(vec![hot_token("0xhot", "HOT")]);
    let bot = bot(10_000.0, market_data, indicators, discovery);

    bot.run_refresh_cycle().await.unwrap();

    // No exit before any position exists
    bot.run_risk_cycle().await.unwrap();

    bot.run_trading_cycle().await.unwrap();

    // Entry: momentum scorer clamps to 95, sizing 100 * 0.95
    let portfolio = bot.portfolio().await;
    let position = portfolio.position("0xhot").expect("position opened");
    assert!((position.amount - 95.0).abs() < 1e-9);
    assert!((position.avg_price - 1.0).abs() < 1e-9);

    let records = bot.strategy_history().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].strategy, "momentum");
    assert_eq!(records[0].outcome, TradeOutcome::Active);

    // Second refresh moves the cached price to 1.30; the risk cycle exits
    bot.run_refresh_cycle().await.unwrap();
    bot.run_risk_cycle().await.unwrap();

    let portfolio = bot.portfolio().await;
    assert!(portfolio.position("0xhot").is_none());
    // (1.3 - 1.0) * 95 / 1.0 = 28.5 realized
    assert!((portfolio.total_profit - 28.5).abs() < 1e-9);
    assert!((portfolio.available_balance - 10_028.5).abs() < 1e-9);

    let trades = bot.recent_trades().await;
    let last = trades.last().unwrap();
    assert_eq!(last.action, TradeAction::Sell);
    assert_eq!(last.exit_reason, Some(ExitReason::TakeProfit));

    let analysis = bot.trade_analysis().await;
    assert_eq!(analysis.total_trades, 1);
    assert_eq!(analysis.wins, 1);
    assert_eq!(analysis.best_strategy.as_deref(), Some("momentum"));

    let reports = bot.strategy_reports().await;
    assert_eq!(reports[0].strategy, "momentum");
    assert!((reports[0].win_rate - 100.0).abs() < 1e-9);
    assert!(reports[0].score > 0.0);
}

#[tokio::test]
async fn stop_loss_path_counts_daily_loss() {
    // Entry at 1.0, then a drop below the 10% stop
    let market_data = FixedMarketData::new()
        .with_snapshot("0xhot", MarketSnapshot::new(1.0, 100_000.0, 10.0, 1_000_000.0))
        .with_snapshot("0xhot", MarketSnapshot::new(0.85, 100_000.0, -15.0, 1_000_000.0));
    let indicators = FixedIndicators::new().with_indicators("0xhot", bullish_indicators(1.0));
    let discovery = FixedDiscovery::new().with_batch(vec![hot_token("0xhot", "HOT")]);
    let bot = bot(10_000.0, market_data, indicators, discovery);

    bot.run_refresh_cycle().await.unwrap();
    bot.run_trading_cycle().await.unwrap();
    assert_eq!(bot.portfolio().await.active_trades, 1);

    bot.run_refresh_cycle().await.unwrap();
    bot.run_risk_cycle().await.unwrap();

    let portfolio = bot.portfolio().await;
    assert!(portfolio.position("0xhot").is_none());
    // (0.85 - 1.0) * 95 / 1.0 = -14.25
    assert!((portfolio.total_profit + 14.25).abs() < 1e-9);
    assert!((portfolio.daily_loss - 14.25).abs() < 1e-9);

    let trades = bot.recent_trades().await;
    assert_eq!(trades.last().unwrap().exit_reason, Some(ExitReason::StopLoss));

    let analysis = bot.trade_analysis().await;
    assert_eq!(analysis.losses, 1);
    // -15% lands below the loss threshold
    let records = bot.strategy_history().await;
    assert_eq!(records[0].outcome, TradeOutcome::Loss);
}

#[tokio::test]
async fn launch_scorer_covers_tokens_without_market_data() {
    // No snapshot for this address: the momentum path is unavailable and
    // the young token falls through to the launch scorer.
    let mut token = hot_token("0xnew", "NEW");
    token.price_change_24h = 25.0;
    token.volume_24h = 80_000.0; // above liquidity for the turnover heuristic

    let market_data = FixedMarketData::new();
    let indicators = FixedIndicators::new();
    let discovery = FixedDiscovery::new().with_batch(vec![token]);
    let bot = bot(10_000.0, market_data, indicators, discovery);

    bot.run_refresh_cycle().await.unwrap();
    bot.run_trading_cycle().await.unwrap();

    let portfolio = bot.portfolio().await;
    let position = portfolio.position("0xnew").expect("launch entry opened");
    // Entry price comes from the estimator fallback
    let expected = estimate_token_price(50_000.0, 80_000.0);
    assert!((position.avg_price - expected).abs() < 1e-12);

    let records = bot.strategy_history().await;
    assert_eq!(records[0].strategy, "launch");
}

#[tokio::test]
async fn risk_gate_blocks_oversized_position() {
    // 10% of a 500 portfolio is 50; the 95-unit sized order must be rejected
    let market_data = FixedMarketData::new()
        .with_snapshot("0xhot", MarketSnapshot::new(1.0, 100_000.0, 10.0, 1_000_000.0));
    let indicators = FixedIndicators::new().with_indicators("0xhot", bullish_indicators(1.0));
    let discovery = FixedDiscovery::new().with_batch(vec![hot_token("0xhot", "HOT")]);
    let bot = bot(500.0, market_data, indicators, discovery);

    bot.run_refresh_cycle().await.unwrap();
    bot.run_trading_cycle().await.unwrap();

    let portfolio = bot.portfolio().await;
    assert_eq!(portfolio.active_trades, 0);
    assert!((portfolio.available_balance - 500.0).abs() < 1e-9);
    assert!(bot.strategy_history().await.is_empty());
}

#[tokio::test]
async fn volatile_token_is_not_traded() {
    // 24h swing beyond the 50% ceiling at admission time
    let mut wild = hot_token("0xvol", "VOL");
    wild.price_change_24h = 80.0;

    let market_data = FixedMarketData::new()
        .with_snapshot("0xvol", MarketSnapshot::new(1.0, 100_000.0, 80.0, 1_000_000.0));
    let indicators = FixedIndicators::new().with_indicators("0xvol", bullish_indicators(1.0));
    let discovery = FixedDiscovery::new().with_batch(vec![wild]);
    let bot = bot(10_000.0, market_data, indicators, discovery);

    bot.run_refresh_cycle().await.unwrap();
    bot.run_trading_cycle().await.unwrap();

    assert_eq!(bot.portfolio().await.active_trades, 0);
}

#[tokio::test]
async fn discovery_batches_accumulate_in_directory() {
    let market_data = FixedMarketData::new();
    let indicators = FixedIndicators::new();
    let discovery = FixedDiscovery::new()
        .with_batch(vec![hot_token("0x1", "ONE")])
        .with_batch(vec![hot_token("0x2", "TWO")]);
    let bot = bot(10_000.0, market_data, indicators, discovery);

    bot.run_refresh_cycle().await.unwrap();
    assert_eq!(bot.tokens().len(), 1);
    bot.run_refresh_cycle().await.unwrap();
    assert_eq!(bot.tokens().len(), 2);
}
