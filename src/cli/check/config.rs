use std::path::Path;

use crate::app::Config;
use crate::cli::output;
use crate::domain::StrategyRegistry;
use crate::error::Result;

/// Validate configuration and environment without starting the monitor.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Configuration");

    if path.exists() {
        output::field("File", path.display());
    } else {
        output::field("File", output::muted("not found, using defaults"));
    }

    let config = Config::load_or_default(path)?;
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Watchlist", &config.monitor.watchlist_url);
    output::field(
        "Source",
        if config.browser.enabled {
            format!("chromedriver ({})", config.browser.driver_url)
        } else {
            "http".to_string()
        },
    );
    output::field(
        "Poll",
        format!(
            "every {}s, backoff {}s",
            config.monitor.poll_interval_secs, config.monitor.error_backoff_secs
        ),
    );
    output::field("Min pings", config.monitor.min_pings);
    output::field(
        "Candles",
        format!(
            "{} x {} from {}",
            config.market_data.limit, config.market_data.interval, config.market_data.api_url
        ),
    );
    output::field("Strategies", config.strategies.enabled.join(", "));
    output::field("Health", config.server.bind_addr());
    output::field(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );

    output::section("Checks");
    let strategies = StrategyRegistry::from_names(&config.strategies.enabled, &config.analyzer);
    if strategies.len() == config.strategies.enabled.len() {
        output::success("All enabled strategies are known");
    } else {
        output::warning(&format!(
            "Unknown strategies will be skipped (known: {})",
            strategies.names().join(", ")
        ));
    }

    if config.telegram.credentials().is_some() {
        output::success("Telegram credentials found");
    } else if config.telegram.enabled {
        output::warning("Telegram disabled: set TELEGRAM_TOKEN and TELEGRAM_CHAT_ID");
    } else {
        output::note("Telegram disabled in config");
    }

    if config.browser.enabled && !cfg!(feature = "webdriver") {
        output::warning("Browser mode requested but this build lacks the webdriver feature");
    }

    Ok(())
}
