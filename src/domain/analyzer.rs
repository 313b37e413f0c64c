//! Indicator computation over candle history.

use serde::Deserialize;

use super::indicator::{atr, bollinger, ema, latest, macd, rsi};
use super::kline::{closes, highs, lows, Kline};
use super::signal::IndicatorSnapshot;

/// Indicator periods and signal thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub rsi_period: usize,
    /// RSI level a short signal must stay above.
    pub rsi_oversold: f64,
    /// RSI level a long signal must stay below.
    pub rsi_overbought: f64,
    pub ema_short: usize,
    pub ema_medium: usize,
    pub ema_long: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
    pub atr_period: usize,
    /// Stop distance in ATR multiples.
    pub stop_loss_atr: f64,
    /// Target distance in ATR multiples.
    pub take_profit_atr: f64,
    /// Confidence attached to emitted signals.
    pub confidence: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            ema_short: 9,
            ema_medium: 21,
            ema_long: 50,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 5,
            bb_std_dev: 2.0,
            atr_period: 14,
            stop_loss_atr: 2.0,
            take_profit_atr: 3.0,
            confidence: 0.8,
        }
    }
}

impl AnalyzerConfig {
    /// Fewest candles that produce a complete snapshot.
    #[must_use]
    pub fn min_candles(&self) -> usize {
        [
            self.ema_short,
            self.ema_medium,
            self.ema_long,
            self.rsi_period + 1,
            self.macd_slow + self.macd_signal - 1,
            self.bb_period,
            self.atr_period + 1,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Computes indicator snapshots from candle history.
#[derive(Debug, Clone, Default)]
pub struct MarketAnalyzer {
    config: AnalyzerConfig,
}

impl MarketAnalyzer {
    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Latest indicator values, or `None` if any indicator is still warming up.
    #[must_use]
    pub fn snapshot(&self, klines: &[Kline]) -> Option<IndicatorSnapshot> {
        let c = &self.config;
        let close = closes(klines);
        let high = highs(klines);
        let low = lows(klines);

        let macd = macd(&close, c.macd_fast, c.macd_slow, c.macd_signal);
        let bands = bollinger(&close, c.bb_period, c.bb_std_dev);

        let snapshot = IndicatorSnapshot {
            ema_short: latest(&ema(&close, c.ema_short))?,
            ema_medium: latest(&ema(&close, c.ema_medium))?,
            ema_long: latest(&ema(&close, c.ema_long))?,
            rsi: latest(&rsi(&close, c.rsi_period))?,
            macd: latest(&macd.line)?,
            macd_signal: latest(&macd.signal)?,
            bb_upper: latest(&bands.upper)?,
            bb_middle: latest(&bands.middle)?,
            bb_lower: latest(&bands.lower)?,
            atr: latest(&atr(&high, &low, &close, c.atr_period))?,
        };

        let values = [
            snapshot.ema_short,
            snapshot.ema_medium,
            snapshot.ema_long,
            snapshot.rsi,
            snapshot.macd,
            snapshot.macd_signal,
            snapshot.atr,
        ];
        values.iter().all(|v| v.is_finite()).then_some(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::kline::series;

    #[test]
    fn test_min_candles_defaults() {
        // EMA 50 dominates MACD's 26 + 9 - 1
        assert_eq!(AnalyzerConfig::default().min_candles(), 50);
    }

    #[test]
    fn test_snapshot_requires_warm_up() {
        let analyzer = MarketAnalyzer::default();
        let prices: Vec<f64> = (0..49).map(|i| 100.0 + i as f64).collect();
        assert!(analyzer.snapshot(&series(&prices)).is_none());

        let prices: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        assert!(analyzer.snapshot(&series(&prices)).is_some());
    }

    #[test]
    fn test_snapshot_orders_emas_in_trend() {
        let analyzer = MarketAnalyzer::default();
        let prices: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
        let snap = analyzer.snapshot(&series(&prices)).unwrap();
        assert!(snap.ema_short > snap.ema_medium);
        assert!(snap.ema_medium > snap.ema_long);
        assert!(snap.bb_upper >= snap.bb_middle && snap.bb_middle >= snap.bb_lower);
        assert!(snap.atr > 0.0);
    }
}
