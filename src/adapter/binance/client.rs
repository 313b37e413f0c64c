//! Binance REST API client.
//!
//! Fetches candle history from the public spot API. No credentials are
//! needed for market data.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::dto::{ApiErrorBody, RawKline};
use crate::domain::{Interval, Kline};
use crate::error::{Error, Result};
use crate::port::MarketData;

/// HTTP client for the Binance spot REST API.
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    /// Create a client for `base_url` (e.g. `https://api.binance.com`).
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch candles for a symbol, sorted oldest first.
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u16,
    ) -> Result<Vec<Kline>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let limit = limit.to_string();

        debug!(symbol, interval = %interval, limit = %limit, "Fetching klines");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(err) => Error::Exchange {
                    code: err.code,
                    message: err.msg,
                },
                Err(_) => Error::Exchange {
                    code: i64::from(status.as_u16()),
                    message: body,
                },
            });
        }

        let rows: Vec<RawKline> = serde_json::from_str(&body)?;
        let mut klines = rows
            .into_iter()
            .map(Kline::try_from)
            .collect::<Result<Vec<_>>>()?;
        klines.sort_by_key(|k| k.open_time);

        debug!(symbol, count = klines.len(), "Fetched klines");
        Ok(klines)
    }
}

#[async_trait]
impl MarketData for BinanceClient {
    async fn klines(&self, symbol: &str, interval: Interval, limit: u16) -> Result<Vec<Kline>> {
        self.get_klines(symbol, interval, limit).await
    }

    fn exchange_name(&self) -> &'static str {
        "binance"
    }
}
