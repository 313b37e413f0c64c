//! Market data port.

use async_trait::async_trait;

use crate::domain::{Interval, Kline};
use crate::error::Result;

/// Source of historical candles.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Most recent `limit` candles for `symbol`, oldest first.
    async fn klines(&self, symbol: &str, interval: Interval, limit: u16) -> Result<Vec<Kline>>;

    /// Exchange name for logging.
    fn exchange_name(&self) -> &'static str;
}
