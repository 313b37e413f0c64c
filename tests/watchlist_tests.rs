//! HTTP watchlist source against a local page.

mod support;

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crypto_monitor::adapter::watchlist::HttpWatchlist;
use crypto_monitor::domain::WatchEntry;
use crypto_monitor::error::Error;
use crypto_monitor::port::WatchlistSource;

use support::server::{start, watchlist_html};

#[tokio::test]
async fn test_fetch_parses_table_rows() {
    let page = watchlist_html(&[("BTC", "6"), ("eth", "2"), ("DOGE", "n/a"), ("SOL", "4")]);
    let app = Router::new().route("/binance", get(move || async move { Html(page) }));
    let base = start(app).await;

    let url = format!("{base}/binance");
    let source = HttpWatchlist::new(url.clone(), Duration::from_secs(5)).unwrap();
    assert_eq!(source.describe(), url);

    source.open().await.unwrap();
    let entries = source.fetch().await.unwrap();
    source.close().await.unwrap();

    assert_eq!(
        entries,
        vec![
            WatchEntry::new("BTC", 6),
            WatchEntry::new("eth", 2),
            WatchEntry::new("SOL", 4),
        ]
    );
    assert_eq!(entries[1].symbol("usdt"), "ETHUSDT");
}

#[tokio::test]
async fn test_error_status_is_a_watchlist_error() {
    let app = Router::new().route(
        "/binance",
        get(|| async { (StatusCode::NOT_FOUND, "gone") }),
    );
    let base = start(app).await;
    let source = HttpWatchlist::new(format!("{base}/binance"), Duration::from_secs(5)).unwrap();

    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, Error::Watchlist(ref m) if m.contains("404")));
}

#[tokio::test]
async fn test_page_without_table_is_rejected() {
    let app = Router::new().route(
        "/binance",
        get(|| async { Html("<html><body><p>Loading...</p></body></html>") }),
    );
    let base = start(app).await;
    let source = HttpWatchlist::new(format!("{base}/binance"), Duration::from_secs(5)).unwrap();

    assert!(matches!(
        source.fetch().await,
        Err(Error::Watchlist(_))
    ));
}
