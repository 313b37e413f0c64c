//! Doubles for the ports.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{
    AnalysisContext, Direction, Interval, Kline, Strategy, TradingSignal, WatchEntry,
};
use crate::error::{Error, Result};
use crate::port::{Event, MarketData, Notifier, WatchlistSource};

// ---------------------------------------------------------------------------
// ScriptedWatchlist
// ---------------------------------------------------------------------------

/// A watchlist that replays scripted fetch results.
///
/// Each `fetch()` pops the next result; once the script runs out the last
/// successful list is repeated (empty if there never was one).
#[derive(Clone, Default)]
pub struct ScriptedWatchlist {
    script: Arc<Mutex<VecDeque<Result<Vec<WatchEntry>>>>>,
    last: Arc<Mutex<Vec<WatchEntry>>>,
    opens: Arc<AtomicU32>,
    fetches: Arc<AtomicU32>,
    closes: Arc<AtomicU32>,
}

impl ScriptedWatchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return `entries`.
    pub fn with_entries(entries: Vec<WatchEntry>) -> Self {
        let source = Self::new();
        *source.last.lock() = entries;
        source
    }

    pub fn push(&self, result: Result<Vec<WatchEntry>>) {
        self.script.lock().push_back(result);
    }

    pub fn opens(&self) -> u32 {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WatchlistSource for ScriptedWatchlist {
    async fn open(&self) -> Result<()> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch(&self) -> Result<Vec<WatchEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(entries)) => {
                *self.last.lock() = entries.clone();
                Ok(entries)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.lock().clone()),
        }
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

// ---------------------------------------------------------------------------
// StaticMarketData
// ---------------------------------------------------------------------------

/// Market data served from a map; unknown symbols fail like Binance does.
#[derive(Clone, Default)]
pub struct StaticMarketData {
    klines: Arc<Mutex<HashMap<String, Vec<Kline>>>>,
    calls: Arc<AtomicU32>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the candles for `symbol`.
    pub fn set(&self, symbol: &str, klines: Vec<Kline>) {
        self.klines.lock().insert(symbol.to_string(), klines);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketData for StaticMarketData {
    async fn klines(&self, symbol: &str, _interval: Interval, limit: u16) -> Result<Vec<Kline>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let klines = self.klines.lock().get(symbol).cloned();
        match klines {
            Some(klines) => {
                let skip = klines.len().saturating_sub(usize::from(limit));
                Ok(klines.into_iter().skip(skip).collect())
            }
            None => Err(Error::Exchange {
                code: -1121,
                message: "Invalid symbol.".to_string(),
            }),
        }
    }

    fn exchange_name(&self) -> &'static str {
        "static"
    }
}

// ---------------------------------------------------------------------------
// RecordingNotifier
// ---------------------------------------------------------------------------

/// Thread-safe event collector for notification assertions in tests.
///
/// Can be switched to failing mode to exercise delivery errors.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Signals recorded so far, in order.
    pub fn signals(&self) -> Vec<TradingSignal> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                Event::SignalDetected(s) => Some(s.signal.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, event: &Event) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Notify("recording notifier set to fail".into()));
        }
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

// ---------------------------------------------------------------------------
// FixedStrategy
// ---------------------------------------------------------------------------

/// A strategy that signals every symbol at its last close.
///
/// Stops and targets sit `offset` away from the price.
pub struct FixedStrategy {
    pub direction: Direction,
    pub confidence: f64,
    pub offset: Decimal,
}

impl FixedStrategy {
    pub fn long(confidence: f64, offset: Decimal) -> Self {
        Self {
            direction: Direction::Long,
            confidence,
            offset,
        }
    }
}

impl Strategy for FixedStrategy {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<TradingSignal> {
        let price = ctx.last_close()?;
        let (stop_loss, take_profit) = match self.direction {
            Direction::Long => (price - self.offset, price + self.offset),
            Direction::Short => (price + self.offset, price - self.offset),
        };
        Some(TradingSignal {
            symbol: ctx.symbol.to_string(),
            direction: self.direction,
            price,
            entry: price,
            stop_loss,
            take_profit,
            confidence: self.confidence,
            timestamp: Utc::now(),
            indicators: *ctx.indicators,
        })
    }
}
