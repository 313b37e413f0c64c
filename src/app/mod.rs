//! Application layer: configuration, the monitor loop and its wiring.

pub mod config;
mod monitor;
mod orchestrator;
mod state;
mod throttle;

pub use config::Config;
pub use monitor::{CycleReport, Monitor, MonitorSettings, SymbolOutcome};
pub use orchestrator::App;
pub(crate) use orchestrator::{build_market_data, build_strategy_registry, build_watchlist_source};
#[cfg(feature = "telegram")]
pub(crate) use orchestrator::telegram_config;
pub use state::{MonitorState, StatusSnapshot};
pub use throttle::NotificationThrottle;
