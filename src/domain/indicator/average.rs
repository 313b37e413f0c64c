//! Moving averages.

use super::Series;

/// Simple moving average.
#[must_use]
pub fn sma(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(sum / period as f64);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out[i] = Some(sum / period as f64);
    }

    out
}

/// Exponential moving average.
///
/// Seeded with the simple average of the first `period` values, so the
/// first output sits at index `period - 1`.
#[must_use]
pub fn ema(values: &[f64], period: usize) -> Series {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(prev);

    for (slot, value) in out.iter_mut().zip(values).skip(period) {
        prev = (value - prev) * k + prev;
        *slot = Some(prev);
    }

    out
}
