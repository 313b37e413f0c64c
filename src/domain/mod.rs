//! Exchange-agnostic domain types: candles, indicators, signals, watchlist
//! entries and tracked market states.

pub mod analyzer;
pub mod indicator;
pub mod kline;
pub mod position;
pub mod retry;
pub mod signal;
pub mod strategy;
pub mod watchlist;

pub use analyzer::{AnalyzerConfig, MarketAnalyzer};
pub use kline::{Interval, Kline};
pub use position::{ExitReason, MarketState, PositionTracker, TrackOutcome};
pub use retry::RetryPolicy;
pub use signal::{Direction, IndicatorSnapshot, TradingSignal};
pub use strategy::{AnalysisContext, Strategy, StrategyRegistry, TrendMomentumStrategy};
pub use watchlist::{parse_watchlist, WatchEntry};
