//! Shared monitor state.
//!
//! Counters are updated by the monitor loop and read by the health endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::domain::{MarketState, PositionTracker};

/// State shared between the monitor loop and the HTTP server.
pub struct MonitorState {
    started_at: DateTime<Utc>,
    /// Market states opened by announced signals.
    positions: RwLock<PositionTracker>,
    cycles_completed: AtomicU64,
    cycles_failed: AtomicU64,
    signals_detected: AtomicU64,
    signals_sent: AtomicU64,
    positions_closed: AtomicU64,
    last_cycle_at: RwLock<Option<DateTime<Utc>>>,
    last_error: RwLock<Option<String>>,
}

impl MonitorState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            positions: RwLock::new(PositionTracker::new()),
            cycles_completed: AtomicU64::new(0),
            cycles_failed: AtomicU64::new(0),
            signals_detected: AtomicU64::new(0),
            signals_sent: AtomicU64::new(0),
            positions_closed: AtomicU64::new(0),
            last_cycle_at: RwLock::new(None),
            last_error: RwLock::new(None),
        }
    }

    /// Get read access to tracked positions.
    pub fn positions(&self) -> parking_lot::RwLockReadGuard<'_, PositionTracker> {
        self.positions.read()
    }

    /// Get write access to tracked positions.
    pub fn positions_mut(&self) -> parking_lot::RwLockWriteGuard<'_, PositionTracker> {
        self.positions.write()
    }

    pub fn record_cycle_success(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
        *self.last_cycle_at.write() = Some(Utc::now());
        *self.last_error.write() = None;
    }

    pub fn record_cycle_failure(&self, error: impl Into<String>) {
        self.cycles_failed.fetch_add(1, Ordering::Relaxed);
        *self.last_cycle_at.write() = Some(Utc::now());
        *self.last_error.write() = Some(error.into());
    }

    pub fn record_signal_detected(&self) {
        self.signals_detected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signal_sent(&self) {
        self.signals_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_position_closed(&self) {
        self.positions_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    #[must_use]
    pub fn snapshot(&self) -> StatusSnapshot {
        let now = Utc::now();
        let positions = self.positions.read();
        StatusSnapshot {
            status: "running",
            started_at: self.started_at,
            uptime_secs: (now - self.started_at).num_seconds().max(0),
            cycles_completed: self.cycles_completed.load(Ordering::Relaxed),
            cycles_failed: self.cycles_failed.load(Ordering::Relaxed),
            signals_detected: self.signals_detected.load(Ordering::Relaxed),
            signals_sent: self.signals_sent.load(Ordering::Relaxed),
            positions_closed: self.positions_closed.load(Ordering::Relaxed),
            last_cycle_at: *self.last_cycle_at.read(),
            last_error: self.last_error.read().clone(),
            tracked: positions.active().into_iter().cloned().collect(),
        }
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of [`MonitorState`].
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub status: &'static str,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    pub signals_detected: u64,
    pub signals_sent: u64,
    pub positions_closed: u64,
    pub last_cycle_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub tracked: Vec<MarketState>,
}
