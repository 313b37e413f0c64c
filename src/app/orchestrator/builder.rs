//! Adapter construction from configuration.

use std::sync::Arc;
#[cfg(feature = "telegram")]
use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::binance::BinanceClient;
use crate::adapter::notifier::{LogNotifier, NotifierRegistry};
use crate::adapter::watchlist::HttpWatchlist;
use crate::app::config::Config;
use crate::domain::StrategyRegistry;
use crate::error::Result;
use crate::port::{MarketData, WatchlistSource};

#[cfg(feature = "telegram")]
use crate::adapter::notifier::{TelegramConfig, TelegramNotifier};
#[cfg(feature = "telegram")]
use crate::domain::RetryPolicy;
#[cfg(feature = "webdriver")]
use crate::adapter::watchlist::{WebDriverSettings, WebDriverWatchlist};

/// Build the watchlist source: ChromeDriver when enabled, plain HTTP otherwise.
pub(crate) fn build_watchlist_source(config: &Config) -> Result<Arc<dyn WatchlistSource>> {
    if config.browser.enabled {
        #[cfg(feature = "webdriver")]
        {
            let browser = &config.browser;
            let settings = WebDriverSettings {
                page_url: config.monitor.watchlist_url.clone(),
                driver_url: browser.driver_url.clone(),
                driver_path: browser.driver_path.clone(),
                chrome_binary: browser.chrome_binary.clone(),
                headless: browser.headless,
                page_load_timeout: browser.page_load_timeout(),
                element_wait: browser.element_wait(),
            };
            info!(driver = %settings.driver_url, "Reading watchlist through ChromeDriver");
            return Ok(Arc::new(WebDriverWatchlist::new(settings)));
        }

        #[cfg(not(feature = "webdriver"))]
        warn!("Browser mode requested but built without the webdriver feature; using HTTP");
    }

    let source = HttpWatchlist::new(
        config.monitor.watchlist_url.clone(),
        config.monitor.request_timeout(),
    )?;
    Ok(Arc::new(source))
}

/// Build the candle source.
pub(crate) fn build_market_data(config: &Config) -> Result<Arc<dyn MarketData>> {
    let client = BinanceClient::new(
        config.market_data.api_url.clone(),
        config.market_data.timeout(),
    )?;
    Ok(Arc::new(client))
}

/// Build strategy registry from configuration.
pub(crate) fn build_strategy_registry(config: &Config) -> StrategyRegistry {
    let registry = StrategyRegistry::from_names(&config.strategies.enabled, &config.analyzer);
    if registry.is_empty() {
        warn!("No known strategies enabled; no signals will be produced");
    }
    registry
}

/// Telegram adapter settings, if Telegram is enabled and configured.
#[cfg(feature = "telegram")]
#[allow(clippy::result_large_err)]
pub(crate) fn telegram_config(config: &Config) -> Result<Option<TelegramConfig>> {
    let Some((token, chat_id)) = config.telegram.credentials() else {
        return Ok(None);
    };

    let app = &config.telegram;
    let api_url = app.api_url.as_deref().map(url::Url::parse).transpose()?;
    Ok(Some(TelegramConfig {
        notify_signals: app.notify_signals,
        notify_positions: app.notify_positions,
        notify_lifecycle: app.notify_lifecycle,
        retry: RetryPolicy::new(
            app.max_retries,
            Duration::from_millis(app.retry_base_delay_ms),
        ),
        api_url,
        ..TelegramConfig::new(token, chat_id)
    }))
}

/// Build notifier registry from configuration.
///
/// The log notifier is always present. Telegram is added when credentials
/// are set; a bot that fails verification is left out with a warning so
/// signals still reach the logs.
pub(crate) async fn build_notifier_registry(config: &Config) -> Result<NotifierRegistry> {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    #[cfg(feature = "telegram")]
    match telegram_config(config)? {
        Some(tg_config) => match TelegramNotifier::connect(tg_config).await {
            Ok((notifier, username)) => {
                info!(bot = %username, "Telegram notifier enabled");
                registry.register(Box::new(notifier));
            }
            Err(e) => warn!(error = %e, "Telegram disabled"),
        },
        None if config.telegram.enabled => {
            warn!("TELEGRAM_TOKEN or TELEGRAM_CHAT_ID not set; Telegram disabled");
        }
        None => {}
    }

    #[cfg(not(feature = "telegram"))]
    if config.telegram.credentials().is_some() {
        warn!("Telegram credentials set but built without the telegram feature");
    }

    Ok(registry)
}
