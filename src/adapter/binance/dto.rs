//! Binance REST wire types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::domain::Kline;
use crate::error::{Error, Result};

/// One row of `/api/v3/klines`.
///
/// Binance sends each candle as a 12-element array: open time, OHLCV as
/// strings, close time, quote volume, trade count, then three fields we
/// ignore.
#[derive(Debug, Deserialize)]
pub struct RawKline(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    pub String,
    pub u64,
    pub IgnoredAny,
    pub IgnoredAny,
    pub IgnoredAny,
);

/// Error body returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

fn timestamp(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| Error::Parse(format!("kline timestamp out of range: {ms}")))
}

fn decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw).map_err(|e| Error::Parse(format!("kline {field} '{raw}': {e}")))
}

impl TryFrom<RawKline> for Kline {
    type Error = Error;

    fn try_from(raw: RawKline) -> Result<Self> {
        Ok(Kline {
            open_time: timestamp(raw.0)?,
            open: decimal("open", &raw.1)?,
            high: decimal("high", &raw.2)?,
            low: decimal("low", &raw.3)?,
            close: decimal("close", &raw.4)?,
            volume: decimal("volume", &raw.5)?,
            close_time: timestamp(raw.6)?,
            quote_volume: decimal("quote volume", &raw.7)?,
            trades: raw.8,
        })
    }
}
