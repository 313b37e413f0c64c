//! Watchlist source adapters.

mod http;
#[cfg(feature = "webdriver")]
mod webdriver;

pub use http::HttpWatchlist;
#[cfg(feature = "webdriver")]
pub use webdriver::{WebDriverSettings, WebDriverWatchlist};
