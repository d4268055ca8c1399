//! Tokenscout - New Token Discovery and Paper Trading Bot Library
//!
//! Discovers newly launched tokens, scores them with weighted heuristic
//! filters, and trades the resulting signals against a simulated in-memory
//! portfolio ledger.
//!
//! # Modules
//!
//! - `domain`: Core business logic (Token, Signal, Portfolio, RiskGate)
//! - `ports`: Trait abstractions (MarketDataProvider, IndicatorProvider, TokenDiscovery)
//! - `strategy`: Signal generation (MomentumScorer, LaunchScorer)
//! - `analytics`: Performance aggregation (trade analysis, Sharpe, drawdown)
//! - `adapters`: External implementations (HTTP price feed, simulation, token directory)
//! - `config`: Configuration loading and validation
//! - `application`: Bot orchestrator and cycle scheduler

pub mod domain;
pub mod ports;
pub mod strategy;
pub mod analytics;
pub mod adapters;
pub mod config;
pub mod application;
