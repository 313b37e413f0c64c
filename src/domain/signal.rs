//! Trading signal types.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Trade direction suggested by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest value of every indicator the analyzer computes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub ema_short: f64,
    pub ema_medium: f64,
    pub ema_long: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub atr: f64,
}

/// A trade idea for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingSignal {
    pub symbol: String,
    pub direction: Direction,
    pub price: Decimal,
    pub entry: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub indicators: IndicatorSnapshot,
}

impl TradingSignal {
    /// Distance from entry to the stop, always non-negative.
    #[must_use]
    pub fn risk(&self) -> Decimal {
        (self.entry - self.stop_loss).abs()
    }

    /// Distance from entry to the target, always non-negative.
    #[must_use]
    pub fn reward(&self) -> Decimal {
        (self.take_profit - self.entry).abs()
    }
}
