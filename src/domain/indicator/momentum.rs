//! Momentum indicators: RSI and MACD.

use super::{ema, Series};

/// Relative strength index with Wilder smoothing.
///
/// The first value sits at index `period`. When a window has neither gains
/// nor losses the index is 0.
#[must_use]
pub fn rsi(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let p = period as f64;
    let (mut gain, mut loss) = (0.0, 0.0);
    for pair in values[..=period].windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain += change;
        } else {
            loss -= change;
        }
    }
    gain /= p;
    loss /= p;
    out[period] = Some(strength(gain, loss));

    for i in period + 1..values.len() {
        let change = values[i] - values[i - 1];
        let (up, down) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        gain = (gain * (p - 1.0) + up) / p;
        loss = (loss * (p - 1.0) + down) / p;
        out[i] = Some(strength(gain, loss));
    }

    out
}

fn strength(gain: f64, loss: f64) -> f64 {
    let total = gain + loss;
    if total == 0.0 {
        0.0
    } else {
        100.0 * gain / total
    }
}

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub line: Series,
    pub signal: Series,
    pub histogram: Series,
}

/// Moving average convergence/divergence.
///
/// Both averages start at index `slow - 1`: the fast EMA is seeded with the
/// mean of the `fast` values ending there rather than the first `fast`
/// values. The signal line is an EMA of the defined part of the line.
#[must_use]
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let n = values.len();
    let empty = Macd {
        line: vec![None; n],
        signal: vec![None; n],
        histogram: vec![None; n],
    };
    if fast == 0 || signal == 0 || fast >= slow || n < slow {
        return empty;
    }

    let offset = slow - fast;
    let slow_ema = ema(values, slow);
    let fast_ema = ema(&values[offset..], fast);
    let line: Series = slow_ema
        .iter()
        .enumerate()
        .map(|(i, s)| match (i.checked_sub(offset).and_then(|j| fast_ema[j]), s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let start = slow - 1;
    let defined: Vec<f64> = line[start..].iter().flatten().copied().collect();
    let mut signal_line = vec![None; start];
    signal_line.extend(ema(&defined, signal));

    let histogram = line
        .iter()
        .zip(&signal_line)
        .map(|(l, s)| match (l, s) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();

    Macd {
        line,
        signal: signal_line,
        histogram,
    }
}
