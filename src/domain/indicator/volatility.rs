//! Volatility indicators: Bollinger bands and average true range.

use super::{sma, Series};

/// Upper, middle and lower Bollinger bands.
#[derive(Debug, Clone, PartialEq)]
pub struct Bollinger {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

/// Bollinger bands using the population standard deviation.
#[must_use]
pub fn bollinger(values: &[f64], period: usize, std_devs: f64) -> Bollinger {
    let middle = sma(values, period);
    let mut upper = vec![None; values.len()];
    let mut lower = vec![None; values.len()];

    for (i, mean) in middle.iter().enumerate() {
        let Some(mean) = *mean else { continue };
        let window = &values[i + 1 - period..=i];
        let variance =
            window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        let band = std_devs * variance.sqrt();
        upper[i] = Some(mean + band);
        lower[i] = Some(mean - band);
    }

    Bollinger {
        upper,
        middle,
        lower,
    }
}

/// Average true range with Wilder smoothing.
///
/// True range starts at the second candle; the first ATR value sits at
/// index `period` and is the mean of the first `period` true ranges.
#[must_use]
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Series {
    let n = high.len().min(low.len()).min(close.len());
    let mut out = vec![None; n];
    if period == 0 || n <= period {
        return out;
    }

    let true_range = |i: usize| -> f64 {
        let prev_close = close[i - 1];
        (high[i] - low[i])
            .max((high[i] - prev_close).abs())
            .max((low[i] - prev_close).abs())
    };

    let p = period as f64;
    let mut value = (1..=period).map(true_range).sum::<f64>() / p;
    out[period] = Some(value);

    for (i, slot) in out.iter_mut().enumerate().skip(period + 1) {
        value = (value * (p - 1.0) + true_range(i)) / p;
        *slot = Some(value);
    }

    out
}
