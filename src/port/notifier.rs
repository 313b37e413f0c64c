//! Notifier port for event notifications.
//!
//! This module defines the trait for announcing monitor events such as
//! detected signals and closed market states.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Direction, ExitReason, MarketState, TradingSignal};
use crate::error::Result;

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// The monitor loop started watching a source.
    Started { source: String },
    /// A strategy produced a signal that passed the confidence filter.
    SignalDetected(SignalEvent),
    /// A tracked market state hit its stop or target.
    PositionClosed(PositionEvent),
    /// The monitor is shutting down.
    Stopped,
}

impl Event {
    /// Symbol the event concerns, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Event::SignalDetected(e) => Some(&e.signal.symbol),
            Event::PositionClosed(e) => Some(&e.symbol),
            Event::Started { .. } | Event::Stopped => None,
        }
    }
}

/// Signal detection event.
#[derive(Debug, Clone)]
pub struct SignalEvent {
    pub signal: TradingSignal,
    /// Name of the strategy that produced the signal.
    pub strategy: String,
}

/// Tracked state closed by a stop or target.
#[derive(Debug, Clone)]
pub struct PositionEvent {
    pub symbol: String,
    pub direction: Direction,
    pub reason: ExitReason,
    pub entry: Decimal,
    pub exit_price: Decimal,
    /// Move from entry in the signal's favour, in percent.
    pub change_pct: Decimal,
    pub opened_at: DateTime<Utc>,
}

impl PositionEvent {
    #[must_use]
    pub fn new(state: &MarketState, reason: ExitReason) -> Self {
        Self {
            symbol: state.symbol.clone(),
            direction: state.direction,
            reason,
            entry: state.entry_points.first().copied().unwrap_or(state.current_price),
            exit_price: state.current_price,
            change_pct: state.change_pct(),
            opened_at: state.started_at,
        }
    }
}

/// Trait for notification handlers.
///
/// Delivery is awaited so callers can tell whether an announcement reached
/// its destination (the signal throttle only counts delivered messages).
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an event.
    async fn notify(&self, event: &Event) -> Result<()>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
