//! CLI integration tests.

mod support;

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::prelude::*;
use assert_cmd::Command;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use predicates::prelude::*;
use tempfile::TempDir;

use support::server::{start, watchlist_html};

const ENV_KEYS: [&str; 8] = [
    "TELEGRAM_TOKEN",
    "TELEGRAM_CHAT_ID",
    "PORT",
    "PRODUCTION",
    "CHROMEDRIVER_PATH",
    "GOOGLE_CHROME_BIN",
    "CHROME_BIN",
    "CHROME_PATH",
];

/// The binary run from an empty directory with a clean environment.
fn crypto_monitor(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("crypto-monitor");
    cmd.current_dir(dir);
    for key in ENV_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("crypto-monitor"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_check_config_uses_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .args(["check", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("agile-cliffs-23967"))
        .stdout(predicate::str::contains("trend_momentum"))
        .stdout(predicate::str::contains("TELEGRAM_TOKEN"));
}

#[test]
fn test_check_config_reports_credentials_from_env() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .args(["check", "config"])
        .env("TELEGRAM_TOKEN", "123:abc")
        .env("TELEGRAM_CHAT_ID", "-1001")
        .assert()
        .success()
        .stdout(predicate::str::contains("Telegram credentials found"));
}

#[test]
fn test_check_config_accepts_channel_username() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .args(["check", "config"])
        .env("TELEGRAM_TOKEN", "123:abc")
        .env("TELEGRAM_CHAT_ID", "@signals")
        .assert()
        .success()
        .stdout(predicate::str::contains("Telegram credentials found"));
}

#[test]
fn test_check_config_rejects_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[monitor]\nmin_confidence = 1.5\n").unwrap();

    crypto_monitor(dir.path())
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("monitor.min_confidence"));
}

#[test]
fn test_check_config_rejects_bad_chat_id() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .args(["check", "config"])
        .env("TELEGRAM_CHAT_ID", "not-a-number")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TELEGRAM_CHAT_ID"));
}

#[test]
fn test_analyze_rejects_unknown_interval() {
    let dir = TempDir::new().unwrap();
    crypto_monitor(dir.path())
        .args(["analyze", "BTCUSDT", "--interval", "7m"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("7m"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_watchlist_prints_rows() {
    let page = watchlist_html(&[("BTC", "5"), ("XRP", "1")]);
    let app = Router::new().route("/binance", get(move || async move { Html(page) }));
    let base = start(app).await;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!("[monitor]\nwatchlist_url = \"{base}/binance\"\n"),
    )
    .unwrap();

    let dir_path = dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        crypto_monitor(&dir_path)
            .args(["check", "watchlist", "--config"])
            .arg(&path)
            .output()
    })
    .await
    .unwrap()
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows, 1 with at least 4 pings"))
        .stdout(predicate::str::contains("BTCUSDT"))
        .stdout(predicate::str::contains("XRPUSDT"));
}
