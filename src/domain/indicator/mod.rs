//! Technical indicators over price series.
//!
//! Every indicator returns a [`Series`] aligned with its input: index `i`
//! of the output describes candle `i`, and candles inside the warm-up
//! window are `None`. A zero period or an input shorter than the
//! warm-up window yields an all-`None` series rather than an error.

mod average;
mod momentum;
mod volatility;

pub use average::{ema, sma};
pub use momentum::{macd, rsi, Macd};
pub use volatility::{atr, bollinger, Bollinger};

/// Indicator output aligned with the input candles.
pub type Series = Vec<Option<f64>>;

/// Most recent defined value of a series.
#[must_use]
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_skips_nothing() {
        assert_eq!(latest(&[Some(1.0), Some(2.0)]), Some(2.0));
        assert_eq!(latest(&[Some(1.0), None]), None);
        assert_eq!(latest(&[]), None);
    }
}
