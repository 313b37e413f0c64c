//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides. Every field has a default, so a deployment can run from the
//! environment alone. Telegram credentials are never read from the file.

use serde::Deserialize;
use std::path::Path;

use crate::domain::AnalyzerConfig;
use crate::error::{ConfigError, Result};

mod logging;
mod monitor;
mod rolling;
mod service;

pub use logging::LoggingConfig;
pub use monitor::{BrowserConfig, MarketDataConfig, MonitorConfig};
pub use rolling::RollingFile;
pub use service::{ServerConfig, StrategiesConfig, TelegramAppConfig};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Binance rejects kline requests above this limit.
const MAX_KLINE_LIMIT: u16 = 1000;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub browser: BrowserConfig,
    pub market_data: MarketDataConfig,
    pub analyzer: AnalyzerConfig,
    pub strategies: StrategiesConfig,
    pub telegram: TelegramAppConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load a config file, apply the environment and validate.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without touching the environment.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    /// Apply overrides from the process environment.
    #[allow(clippy::result_large_err)]
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`.
    ///
    /// - `TELEGRAM_TOKEN`, `TELEGRAM_CHAT_ID`: Telegram credentials; the chat
    ///   is a numeric id or an `@channel` username
    /// - `PORT`: health server port
    /// - `PRODUCTION` (`1` or `true`): JSON logs
    /// - `CHROMEDRIVER_PATH`: read the watchlist through ChromeDriver; an
    ///   `http(s)` value is the driver endpoint, anything else its binary
    /// - `GOOGLE_CHROME_BIN`, `CHROME_BIN`, `CHROME_PATH`: Chrome binary,
    ///   first one set wins
    #[allow(clippy::result_large_err)]
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("TELEGRAM_TOKEN") {
            self.telegram.token = Some(token.trim().to_string());
        }
        if let Some(chat_id) = var("TELEGRAM_CHAT_ID") {
            let chat_id = chat_id.trim();
            if !is_chat_id(chat_id) {
                return Err(invalid(
                    "TELEGRAM_CHAT_ID",
                    "expected a numeric chat id or an @channel username",
                ));
            }
            self.telegram.chat_id = Some(chat_id.to_string());
        }

        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue {
                    field: "PORT",
                    reason: e.to_string(),
                })?;
        }

        if let Some(production) = var("PRODUCTION") {
            let production = production.trim();
            if production == "1" || production.eq_ignore_ascii_case("true") {
                self.logging.format = "json".into();
            }
        }

        if let Some(driver) = var("CHROMEDRIVER_PATH") {
            let driver = driver.trim();
            self.browser.enabled = true;
            if driver.starts_with("http://") || driver.starts_with("https://") {
                self.browser.driver_url = driver.to_string();
            } else {
                self.browser.driver_path = Some(driver.into());
            }
        }

        if let Some(chrome) = ["GOOGLE_CHROME_BIN", "CHROME_BIN", "CHROME_PATH"]
            .into_iter()
            .find_map(|key| var(key))
        {
            self.browser.chrome_binary = Some(chrome.trim().into());
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.monitor.watchlist_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "monitor.watchlist_url",
            }
            .into());
        }
        url::Url::parse(&self.monitor.watchlist_url).map_err(|e| ConfigError::InvalidValue {
            field: "monitor.watchlist_url",
            reason: e.to_string(),
        })?;
        if self.monitor.poll_interval_secs == 0 {
            return Err(invalid("monitor.poll_interval_secs", "must be positive"));
        }
        if self.monitor.request_timeout_secs == 0 {
            return Err(invalid("monitor.request_timeout_secs", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.monitor.min_confidence) {
            return Err(invalid(
                "monitor.min_confidence",
                "must be between 0 and 1",
            ));
        }
        if self.monitor.quote_asset.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "monitor.quote_asset",
            }
            .into());
        }

        if self.market_data.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "market_data.api_url",
            }
            .into());
        }
        if self.market_data.timeout_secs == 0 {
            return Err(invalid("market_data.timeout_secs", "must be positive"));
        }
        if self.market_data.limit == 0 || self.market_data.limit > MAX_KLINE_LIMIT {
            return Err(invalid(
                "market_data.limit",
                format!("must be between 1 and {MAX_KLINE_LIMIT}"),
            ));
        }
        let needed = self.analyzer.min_candles();
        if usize::from(self.market_data.limit) < needed {
            return Err(invalid(
                "market_data.limit",
                format!("indicators need at least {needed} candles"),
            ));
        }

        let a = &self.analyzer;
        let periods = [
            a.rsi_period,
            a.ema_short,
            a.ema_medium,
            a.ema_long,
            a.macd_fast,
            a.macd_slow,
            a.macd_signal,
            a.bb_period,
            a.atr_period,
        ];
        if periods.contains(&0) {
            return Err(invalid("analyzer", "indicator periods must be positive"));
        }
        if a.macd_fast >= a.macd_slow {
            return Err(invalid(
                "analyzer.macd_fast",
                "must be shorter than analyzer.macd_slow",
            ));
        }
        if a.stop_loss_atr <= 0.0 || a.take_profit_atr <= 0.0 {
            return Err(invalid("analyzer", "ATR multiples must be positive"));
        }

        if self.strategies.enabled.is_empty() {
            return Err(ConfigError::MissingField {
                field: "strategies.enabled",
            }
            .into());
        }

        if let Some(api_url) = &self.telegram.api_url {
            url::Url::parse(api_url).map_err(|e| ConfigError::InvalidValue {
                field: "telegram.api_url",
                reason: e.to_string(),
            })?;
        }

        if self.browser.enabled && self.browser.element_wait_secs == 0 {
            return Err(invalid("browser.element_wait_secs", "must be positive"));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format", "expected \"pretty\" or \"json\""));
        }
        if self.logging.file.is_some() && self.logging.max_file_mb == 0 {
            return Err(invalid("logging.max_file_mb", "must be positive"));
        }

        Ok(())
    }

    /// Initialize logging with the configured settings.
    #[allow(clippy::result_large_err)]
    pub fn init_logging(&self) -> Result<()> {
        self.logging.init()
    }
}

/// Numeric chat id or `@username`.
fn is_chat_id(value: &str) -> bool {
    value.parse::<i64>().is_ok() || (value.len() > 1 && value.starts_with('@'))
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
