//! Signal strategies.
//!
//! A strategy looks at a symbol's candles and the analyzer's indicator
//! snapshot and decides whether a trade idea is worth announcing.
//! Strategies are registered by name in a [`StrategyRegistry`].

mod registry;
mod trend_momentum;

pub use registry::StrategyRegistry;
pub use trend_momentum::TrendMomentumStrategy;

use super::kline::Kline;
use super::signal::{IndicatorSnapshot, TradingSignal};

/// Everything a strategy may inspect for one symbol.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub symbol: &'a str,
    pub klines: &'a [Kline],
    pub indicators: &'a IndicatorSnapshot,
}

impl<'a> AnalysisContext<'a> {
    #[must_use]
    pub const fn new(
        symbol: &'a str,
        klines: &'a [Kline],
        indicators: &'a IndicatorSnapshot,
    ) -> Self {
        Self {
            symbol,
            klines,
            indicators,
        }
    }

    /// Close of the newest candle.
    #[must_use]
    pub fn last_close(&self) -> Option<rust_decimal::Decimal> {
        self.klines.last().map(|k| k.close)
    }
}

/// A signal generator.
pub trait Strategy: Send + Sync {
    /// Name used in configuration.
    fn name(&self) -> &'static str;

    /// Evaluate the context, returning a signal when the entry rule holds.
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<TradingSignal>;
}
