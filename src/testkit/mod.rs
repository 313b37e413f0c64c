//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`kline`] - Candle builders, including series that trigger signals.
//! - [`signal`] - Ready-made trading signals.
//! - [`source`] - Port doubles: `ScriptedWatchlist`, `StaticMarketData`,
//!   `RecordingNotifier`, `FixedStrategy`.

pub mod kline;
pub mod signal;
pub mod source;
