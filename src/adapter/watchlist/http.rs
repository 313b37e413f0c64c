//! Watchlist read with a plain HTTP request.
//!
//! Works when the page renders its table server-side.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::{parse_watchlist, WatchEntry};
use crate::error::{Error, Result};
use crate::port::WatchlistSource;

pub struct HttpWatchlist {
    client: Client,
    url: String,
}

impl HttpWatchlist {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl WatchlistSource for HttpWatchlist {
    async fn fetch(&self) -> Result<Vec<WatchEntry>> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Watchlist(format!(
                "watchlist page returned {status}"
            )));
        }

        let html = response.text().await?;
        let entries = parse_watchlist(&html)?;
        debug!(url = %self.url, rows = entries.len(), "Watchlist fetched");
        Ok(entries)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
