//! Port definitions: the traits adapters implement.

pub mod market_data;
pub mod notifier;
pub mod watchlist;

pub use market_data::MarketData;
pub use notifier::{Event, Notifier, PositionEvent, SignalEvent};
pub use watchlist::WatchlistSource;
