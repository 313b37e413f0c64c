//! Candle builders.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::Kline;

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Five-minute candles closing at `closes`.
///
/// Each candle opens at the previous close and its range extends half a
/// unit beyond the body, so ATR is always positive.
pub fn series(closes: &[f64]) -> Vec<Kline> {
    let start = base_time();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let open_time = start + Duration::minutes(5 * i as i64);
            Kline {
                open_time,
                open: decimal(open),
                high: decimal(open.max(close) + 0.5),
                low: decimal(open.min(close) - 0.5),
                close: decimal(close),
                volume: Decimal::ONE_HUNDRED,
                close_time: open_time + Duration::minutes(5) - Duration::milliseconds(1),
                quote_volume: decimal(close * 100.0),
                trades: 10,
            }
        })
        .collect()
}

/// Closes from 100 that alternate +2 and -1.25, ending on a rise.
///
/// With default analyzer settings and an even `n` of at least 60 this
/// produces a long signal.
pub fn rising_zigzag(n: usize) -> Vec<f64> {
    zigzag(n, 100.0, 2.0, -1.25)
}

/// Mirror image of [`rising_zigzag`] starting at 300; produces a short signal.
pub fn falling_zigzag(n: usize) -> Vec<f64> {
    zigzag(n, 300.0, -2.0, 1.25)
}

fn zigzag(n: usize, start: f64, first: f64, second: f64) -> Vec<f64> {
    let mut closes = Vec::with_capacity(n);
    let mut price = start;
    for i in 0..n {
        if i > 0 {
            price += if i % 2 == 1 { first } else { second };
        }
        closes.push(price);
    }
    closes
}

/// Closes that never move; no strategy fires on them.
pub fn flat(n: usize, price: f64) -> Vec<f64> {
    vec![price; n]
}
