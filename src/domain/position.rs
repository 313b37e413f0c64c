//! Tracking of announced signals until their stop or target is hit.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::signal::{Direction, TradingSignal};

/// Why a tracked market state was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::StopLoss => f.write_str("stop loss"),
            ExitReason::TakeProfit => f.write_str("take profit"),
        }
    }
}

/// State of a symbol after a signal was announced for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketState {
    pub symbol: String,
    pub started_at: DateTime<Utc>,
    pub direction: Direction,
    pub current_price: Decimal,
    pub highest_price: Decimal,
    pub lowest_price: Decimal,
    pub entry_points: Vec<Decimal>,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    /// Set once price has traded through the first entry.
    pub entry_triggered: bool,
    pub is_active: bool,
}

impl MarketState {
    #[must_use]
    pub fn from_signal(signal: &TradingSignal) -> Self {
        Self {
            symbol: signal.symbol.clone(),
            started_at: signal.timestamp,
            direction: signal.direction,
            current_price: signal.price,
            highest_price: signal.price,
            lowest_price: signal.price,
            entry_points: vec![signal.entry],
            stop_loss: signal.stop_loss,
            take_profit: signal.take_profit,
            entry_triggered: false,
            is_active: true,
        }
    }

    /// Record a new price and report an exit if a level was crossed.
    ///
    /// Inactive states ignore further prices.
    pub fn update(&mut self, price: Decimal) -> Option<ExitReason> {
        if !self.is_active {
            return None;
        }

        self.current_price = price;
        self.highest_price = self.highest_price.max(price);
        self.lowest_price = self.lowest_price.min(price);

        let first_entry = self.entry_points.first().copied().unwrap_or(price);
        let exit = match self.direction {
            Direction::Long => {
                self.entry_triggered |= price >= first_entry;
                if price <= self.stop_loss {
                    Some(ExitReason::StopLoss)
                } else if price >= self.take_profit {
                    Some(ExitReason::TakeProfit)
                } else {
                    None
                }
            }
            Direction::Short => {
                self.entry_triggered |= price <= first_entry;
                if price >= self.stop_loss {
                    Some(ExitReason::StopLoss)
                } else if price <= self.take_profit {
                    Some(ExitReason::TakeProfit)
                } else {
                    None
                }
            }
        };

        if exit.is_some() {
            self.is_active = false;
        }
        exit
    }

    /// Percentage move from the first entry in the signal's favour.
    #[must_use]
    pub fn change_pct(&self) -> Decimal {
        let Some(entry) = self.entry_points.first().copied() else {
            return Decimal::ZERO;
        };
        if entry.is_zero() {
            return Decimal::ZERO;
        }
        let change = (self.current_price - entry) / entry * Decimal::ONE_HUNDRED;
        match self.direction {
            Direction::Long => change,
            Direction::Short => -change,
        }
    }
}

/// Result of feeding a signal to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// A new state was opened.
    Opened,
    /// Same direction as an active state; the entry was appended.
    Added,
    /// Opposite direction to an active state; ignored.
    Ignored,
}

/// Market states keyed by symbol.
#[derive(Debug, Default)]
pub struct PositionTracker {
    states: HashMap<String, MarketState>,
}

impl PositionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a signal's symbol, or add an entry to it.
    pub fn track(&mut self, signal: &TradingSignal) -> TrackOutcome {
        match self.states.get_mut(&signal.symbol) {
            Some(state) if state.direction == signal.direction => {
                state.entry_points.push(signal.entry);
                TrackOutcome::Added
            }
            Some(_) => TrackOutcome::Ignored,
            None => {
                self.states
                    .insert(signal.symbol.clone(), MarketState::from_signal(signal));
                TrackOutcome::Opened
            }
        }
    }

    /// Feed a price to a tracked symbol; a closed state is removed and returned.
    pub fn update(&mut self, symbol: &str, price: Decimal) -> Option<(MarketState, ExitReason)> {
        let reason = self.states.get_mut(symbol)?.update(price)?;
        self.states.remove(symbol).map(|state| (state, reason))
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&MarketState> {
        self.states.get(symbol)
    }

    /// Active states, sorted by symbol.
    #[must_use]
    pub fn active(&self) -> Vec<&MarketState> {
        let mut states: Vec<_> = self.states.values().filter(|s| s.is_active).collect();
        states.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        states
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
