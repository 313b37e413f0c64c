//! Ready-made trading signals.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{Direction, IndicatorSnapshot, TradingSignal};

/// A signal at `price` with ATR at 1.5% of price.
///
/// Levels follow the default 2x/3x ATR multiples: a long at 100 has its
/// stop at 97 and its target at 104.5.
pub fn signal(symbol: &str, direction: Direction, price: Decimal) -> TradingSignal {
    let stop = price * dec!(0.03);
    let target = price * dec!(0.045);
    let (stop_loss, take_profit) = match direction {
        Direction::Long => (price - stop, price + target),
        Direction::Short => (price + stop, price - target),
    };

    TradingSignal {
        symbol: symbol.to_string(),
        direction,
        price,
        entry: price,
        stop_loss,
        take_profit,
        confidence: 0.8,
        timestamp: Utc::now(),
        indicators: IndicatorSnapshot {
            ema_short: 101.0,
            ema_medium: 100.0,
            ema_long: 99.0,
            rsi: 55.0,
            macd: 0.5,
            macd_signal: 0.2,
            bb_upper: 104.0,
            bb_middle: 100.0,
            bb_lower: 96.0,
            atr: 1.5,
        },
    }
}
