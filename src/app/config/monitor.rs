//! Watchlist polling, browser and market data settings.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::Interval;

/// Main loop settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Page holding the watchlist table.
    pub watchlist_url: String,
    /// Seconds between successful cycles.
    pub poll_interval_secs: u64,
    /// Seconds to wait after a failed cycle.
    pub error_backoff_secs: u64,
    /// Minimum ping count for an asset to be analyzed.
    pub min_pings: u32,
    /// Quote asset appended to watchlist assets to form a symbol.
    pub quote_asset: String,
    /// Signals at or below this confidence are dropped.
    pub min_confidence: f64,
    /// Minimum seconds between two announcements for one symbol.
    pub notify_interval_secs: u64,
    /// Seconds after which a symbol's last announcement is forgotten.
    pub history_max_age_secs: u64,
    /// Timeout for the plain HTTP watchlist fetch.
    pub request_timeout_secs: u64,
}

impl MonitorConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }

    #[must_use]
    pub const fn notify_interval(&self) -> Duration {
        Duration::from_secs(self.notify_interval_secs)
    }

    #[must_use]
    pub const fn history_max_age(&self) -> Duration {
        Duration::from_secs(self.history_max_age_secs)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            watchlist_url: "https://agile-cliffs-23967.herokuapp.com/binance".into(),
            poll_interval_secs: 60,
            error_backoff_secs: 5,
            min_pings: 4,
            quote_asset: "USDT".into(),
            min_confidence: 0.6,
            notify_interval_secs: 300,
            history_max_age_secs: 3600,
            request_timeout_secs: 20,
        }
    }
}

/// ChromeDriver settings, used when the watchlist is read through a browser.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Read the watchlist through ChromeDriver instead of a plain request.
    pub enabled: bool,
    pub driver_url: String,
    /// ChromeDriver binary to launch. Unset means one is already listening.
    pub driver_path: Option<PathBuf>,
    pub chrome_binary: Option<PathBuf>,
    pub headless: bool,
    pub page_load_timeout_secs: u64,
    /// Seconds to wait for the watchlist table to appear.
    pub element_wait_secs: u64,
}

impl BrowserConfig {
    #[must_use]
    pub const fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub const fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_wait_secs)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            driver_url: "http://localhost:9515".into(),
            driver_path: None,
            chrome_binary: None,
            headless: true,
            page_load_timeout_secs: 30,
            element_wait_secs: 20,
        }
    }
}

/// Candle source settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub api_url: String,
    pub interval: Interval,
    /// Candles requested per symbol.
    pub limit: u16,
    pub timeout_secs: u64,
}

impl MarketDataConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.binance.com".into(),
            interval: Interval::default(),
            limit: 100,
            timeout_secs: 10,
        }
    }
}
