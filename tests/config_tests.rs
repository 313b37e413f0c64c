//! Loading configuration files from disk.

use std::io::Write;

use crypto_monitor::app::config::Config;
use crypto_monitor::domain::Interval;
use crypto_monitor::error::{ConfigError, Error};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_reads_file_sections() {
    let file = write_config(
        r#"
[monitor]
watchlist_url = "https://watch.example.com/binance"
min_pings = 6
quote_asset = "BUSD"

[market_data]
interval = "1h"
limit = 200

[analyzer]
stop_loss_atr = 1.5

[strategies]
enabled = ["trend_momentum"]
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.monitor.watchlist_url, "https://watch.example.com/binance");
    assert_eq!(config.monitor.min_pings, 6);
    assert_eq!(config.monitor.quote_asset, "BUSD");
    assert_eq!(config.market_data.interval, Interval::OneHour);
    assert_eq!(config.market_data.limit, 200);
    assert!((config.analyzer.stop_loss_atr - 1.5).abs() < f64::EPSILON);
    // Untouched sections keep their defaults
    assert_eq!(config.monitor.poll_interval_secs, 60);
}

#[test]
fn test_load_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.monitor.min_pings, 4);
    assert_eq!(config.strategies.enabled, vec!["trend_momentum".to_string()]);
}

#[test]
fn test_load_rejects_invalid_values() {
    let file = write_config(
        r#"
[market_data]
limit = 20
"#,
    );
    let result = Config::load(file.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue { field: "market_data.limit", .. }))
    ));
}

#[test]
fn test_load_rejects_unknown_interval() {
    let file = write_config(
        r#"
[market_data]
interval = "7m"
"#,
    );
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
