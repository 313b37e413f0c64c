//! Diagnostic checks.

mod config;
mod telegram;
mod watchlist;

pub use config::execute_config;
pub use telegram::execute_telegram;
pub use watchlist::execute_watchlist;
