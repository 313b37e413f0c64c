//! Watchlist source port.

use async_trait::async_trait;

use crate::domain::WatchEntry;
use crate::error::Result;

/// Something that can read the current watchlist.
///
/// Sources that hold a session (a browser) set it up in [`open`] and tear it
/// down in [`close`]; stateless sources keep the default no-ops.
///
/// [`open`]: WatchlistSource::open
/// [`close`]: WatchlistSource::close
#[async_trait]
pub trait WatchlistSource: Send + Sync {
    /// Prepare the source before the first fetch.
    async fn open(&self) -> Result<()> {
        Ok(())
    }

    /// Read the watchlist as it is now.
    async fn fetch(&self) -> Result<Vec<WatchEntry>>;

    /// Release any session held by the source.
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    /// Where the watchlist is read from, for logs and startup messages.
    fn describe(&self) -> String;
}
