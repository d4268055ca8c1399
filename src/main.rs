//! tokenscout - Paper trading bot for newly launched tokens
//!
//! Scores freshly discovered tokens with additive momentum heuristics and
//! trades them against a simulated portfolio.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use tokenscout::adapters::{
    DexScreenerFeed, SimulatedDiscovery, SimulatedIndicators, SimulatedMarketData,
};
use tokenscout::application::TradingBot;
use tokenscout::config::{load_config, Config};
use tokenscout::domain::BotSettings;
use tokenscout::ports::MarketDataProvider;

/// tokenscout - Paper trading bot for newly launched tokens
#[derive(Parser, Debug)]
#[command(
    name = "tokenscout",
    version = env!("CARGO_PKG_VERSION"),
    about = "Paper trading bot for newly launched tokens",
    long_about = "tokenscout discovers new tokens, scores them with additive momentum \
                  heuristics, and paper-trades the strongest signals with stop-loss and \
                  take-profit protection."
)]
struct CliApp {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the trading loop
    Run(RunArgs),

    /// Run a short session and print the portfolio summary
    Status(SessionArgs),

    /// Run a short session and print the discovered token table
    Tokens(SessionArgs),

    /// Run a short session and print performance analytics
    Performance(SessionArgs),

    /// Run a short session and print recent trades
    History(SessionArgs),

    /// Run a short session and print strategy rankings
    Strategies(SessionArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Override the trading cycle interval in seconds
    #[arg(long, value_name = "SECS")]
    interval: Option<u64>,
}

/// Arguments for the bounded report sessions
#[derive(Parser, Debug)]
struct SessionArgs {
    /// Number of simulated trading rounds to execute
    #[arg(short = 'n', long, default_value_t = 10)]
    rounds: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let config = load_config(&app.config)
        .with_context(|| format!("Failed to load configuration from {}", app.config.display()))?;
    init_logging(app.verbose, app.debug, &config.logging.level);

    match app.command {
        Command::Run(args) => run_command(config, args).await,
        Command::Status(args) => status_command(config, args).await,
        Command::Tokens(args) => tokens_command(config, args).await,
        Command::Performance(args) => performance_command(config, args).await,
        Command::History(args) => history_command(config, args).await,
        Command::Strategies(args) => strategies_command(config, args).await,
    }
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new(config_level.to_string())
    };

    fmt().with_env_filter(filter).init();
}

fn build_bot(config: &Config) -> Result<Arc<TradingBot>> {
    let market_data: Arc<dyn MarketDataProvider> = if config.market_data.simulated {
        Arc::new(SimulatedMarketData::new())
    } else {
        Arc::new(
            DexScreenerFeed::with_timeout(Duration::from_secs(
                config.market_data.request_timeout_secs,
            ))
            .context("Failed to create market data client")?,
        )
    };

    Ok(Arc::new(TradingBot::new(
        config.trading.initial_balance,
        BotSettings::from(config),
        market_data,
        Arc::new(SimulatedIndicators::new()),
        Arc::new(SimulatedDiscovery::new()),
    )))
}

async fn run_command(config: Config, args: RunArgs) -> Result<()> {
    tracing::info!("Starting tokenscout...");

    let mut intervals = config.intervals();
    if let Some(secs) = args.interval {
        intervals.trading_secs = secs;
    }
    let bot = build_bot(&config)?;

    if !config.trading.enabled {
        tracing::warn!("Trading is disabled in config; cycles will idle until enabled");
    }

    let handle = bot.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        handle.stop().await;
    });

    bot.run(intervals).await;
    tracing::info!("tokenscout stopped");
    Ok(())
}

/// Build a bot on simulated providers and drive it for a bounded session
async fn session_bot(config: &Config, rounds: usize) -> Result<Arc<TradingBot>> {
    let mut session_config = config.clone();
    session_config.trading.enabled = true;
    session_config.market_data.simulated = true;

    let bot = build_bot(&session_config)?;
    for _ in 0..rounds {
        if let Err(e) = bot.run_refresh_cycle().await {
            tracing::error!("Refresh cycle failed: {}", e);
        }
        if let Err(e) = bot.run_trading_cycle().await {
            tracing::error!("Trading cycle failed: {}", e);
        }
        if let Err(e) = bot.run_risk_cycle().await {
            tracing::error!("Risk cycle failed: {}", e);
        }
        if let Err(e) = bot.run_analytics_cycle().await {
            tracing::error!("Analytics cycle failed: {}", e);
        }
    }
    Ok(bot)
}

async fn status_command(config: Config, args: SessionArgs) -> Result<()> {
    let bot = session_bot(&config, args.rounds).await?;
    let portfolio = bot.portfolio().await;

    println!("Portfolio after {} simulated rounds", args.rounds);
    println!("  Total value:       {:.2}", portfolio.total_value);
    println!("  Available balance: {:.2}", portfolio.available_balance);
    println!("  Open positions:    {}", portfolio.active_trades);
    println!("  Realized profit:   {:.2}", portfolio.total_profit);
    println!("  Daily loss:        {:.2}", portfolio.daily_loss);
    println!("  Max drawdown:      {:.2}%", portfolio.max_drawdown_pct);

    for position in bot.portfolio().await.positions() {
        println!(
            "  {} {:.2} @ {:.8} (unrealized {:+.2})",
            position.symbol, position.amount, position.avg_price, position.unrealized_pnl
        );
    }
    Ok(())
}

async fn tokens_command(config: Config, args: SessionArgs) -> Result<()> {
    let bot = session_bot(&config, args.rounds).await?;
    let tokens = bot.tokens();

    println!("{} tokens discovered (newest first)", tokens.len());
    for token in tokens {
        let flags = match (token.passes_filter, token.high_alert) {
            (_, true) => "ALERT",
            (true, false) => "ok",
            (false, false) => "-",
        };
        println!(
            "  {:<10} liq {:>12.0} holders {:>6} vol {:>12.0} change {:>7.1}% age {:>5.0}m [{}]",
            token.symbol,
            token.liquidity,
            token.holders,
            token.volume_24h,
            token.price_change_24h,
            token.age_minutes(),
            flags
        );
    }
    Ok(())
}

async fn performance_command(config: Config, args: SessionArgs) -> Result<()> {
    let bot = session_bot(&config, args.rounds).await?;
    let analysis = bot.trade_analysis().await;
    let analytics = bot.portfolio_analytics().await;

    println!("Trade analysis");
    println!(
        "  Closed: {} (W {} / L {} / B {})",
        analysis.total_trades, analysis.wins, analysis.losses, analysis.breakevens
    );
    println!("  Avg win:       {:.2}", analysis.avg_win);
    println!("  Avg loss:      {:.2}", analysis.avg_loss);
    println!("  Profit factor: {:.2}", analysis.profit_factor);
    if let Some(best) = &analysis.best_strategy {
        println!("  Best strategy:  {}", best);
    }
    if let Some(worst) = &analysis.worst_strategy {
        println!("  Worst strategy: {}", worst);
    }

    println!("Portfolio analytics");
    println!("  Daily PnL:    {:+.2}", analytics.daily_pnl);
    println!("  Weekly PnL:   {:+.2}", analytics.weekly_pnl);
    println!("  Monthly PnL:  {:+.2}", analytics.monthly_pnl);
    println!("  Sharpe ratio: {:.3}", analytics.sharpe_ratio);
    println!("  Max drawdown: {:.2}%", analytics.max_drawdown_pct);
    Ok(())
}

async fn history_command(config: Config, args: SessionArgs) -> Result<()> {
    let bot = session_bot(&config, args.rounds).await?;

    println!("Recent trades");
    for trade in bot.recent_trades().await {
        let exit = trade
            .exit_reason
            .map(|r| format!(" [{}]", r))
            .unwrap_or_default();
        println!(
            "  #{:<4} {} {:<6} {:.2} @ {:.8}{}",
            trade.id, trade.action, trade.symbol, trade.amount, trade.price, exit
        );
    }

    println!("Strategy trade records");
    for record in bot.strategy_history().await {
        println!(
            "  #{:<4} {:<8} {:<6} conf {:<3} entry {:.8} exit {} -> {}",
            record.id,
            record.strategy,
            record.symbol,
            record.confidence,
            record.entry_price,
            record
                .exit_price
                .map(|p| format!("{:.8}", p))
                .unwrap_or_else(|| "-".to_string()),
            record.outcome
        );
    }
    Ok(())
}

async fn strategies_command(config: Config, args: SessionArgs) -> Result<()> {
    let bot = session_bot(&config, args.rounds).await?;

    println!("Strategy rankings (best first)");
    for report in bot.strategy_reports().await {
        println!(
            "  {:<10} trades {:<4} win rate {:>5.1}% avg PnL {:>6.2}% drawdown {:>5.1}% score {:.1}",
            report.strategy,
            report.closed_trades,
            report.win_rate,
            report.avg_pnl_pct,
            report.max_drawdown_pct,
            report.score
        );
    }
    Ok(())
}
