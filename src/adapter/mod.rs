//! Implementations of ports (hexagonal adapters).

pub mod binance;
pub mod http;
pub mod notifier;
pub mod watchlist;
