//! Crypto Monitor - watchlist-driven trading signals.
//!
//! Polls a watchlist page for assets that are getting attention, pulls
//! their recent candles from Binance, runs technical indicators over them
//! and announces long/short setups to Telegram.
//!
//! # Modules
//!
//! - [`domain`] - Candles, indicators, signals, strategies and tracked market states
//! - [`port`] - Traits at the edges: watchlist source, market data, notifier
//! - [`adapter`] - Binance REST, watchlist readers, notifiers, health server
//! - [`app`] - Configuration, the monitor loop and its wiring
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram notifications via teloxide
//! - `webdriver` - Read the watchlist through ChromeDriver via fantoccini
//! - `testkit` - Test doubles for integration tests
//!
//! # Example
//!
//! ```no_run
//! use crypto_monitor::domain::{AnalyzerConfig, StrategyRegistry};
//!
//! let names = vec!["trend_momentum".to_string()];
//! let registry = StrategyRegistry::from_names(&names, &AnalyzerConfig::default());
//! assert_eq!(registry.len(), 1);
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
