//! Binance client against a local stand-in for the REST API.

mod support;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use rust_decimal_macros::dec;

use crypto_monitor::adapter::binance::BinanceClient;
use crypto_monitor::domain::Interval;
use crypto_monitor::error::Error;
use crypto_monitor::port::MarketData;

use support::server::{kline_rows, start};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

fn klines_app(seen: Seen) -> Router {
    Router::new().route(
        "/api/v3/klines",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let seen = seen.clone();
            async move {
                let symbol = params.get("symbol").cloned().unwrap_or_default();
                seen.lock().push(params);
                if symbol == "BTCUSDT" {
                    Json(kline_rows(&[101.0, 102.5, 99.75])).into_response()
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({"code": -1121, "msg": "Invalid symbol."})),
                    )
                        .into_response()
                }
            }
        }),
    )
}

#[tokio::test]
async fn test_klines_are_decoded_in_order() {
    let seen: Seen = Arc::default();
    let base = start(klines_app(seen.clone())).await;
    let client = BinanceClient::new(format!("{base}/"), Duration::from_secs(5)).unwrap();
    assert_eq!(client.base_url(), base);

    let klines = client
        .klines("BTCUSDT", Interval::FifteenMinutes, 3)
        .await
        .unwrap();

    assert_eq!(klines.len(), 3);
    assert_eq!(klines[0].close, dec!(101));
    assert_eq!(klines[1].high, dec!(103));
    assert_eq!(klines[2].low, dec!(99.25));
    assert_eq!(klines[2].trades, 42);
    assert!(klines.windows(2).all(|w| w[0].open_time < w[1].open_time));

    let params = seen.lock()[0].clone();
    assert_eq!(params["symbol"], "BTCUSDT");
    assert_eq!(params["interval"], "15m");
    assert_eq!(params["limit"], "3");
}

#[tokio::test]
async fn test_api_error_body_is_surfaced() {
    let base = start(klines_app(Arc::default())).await;
    let client = BinanceClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client
        .klines("NOPEUSDT", Interval::default(), 100)
        .await
        .unwrap_err();

    match err {
        Error::Exchange { code, message } => {
            assert_eq!(code, -1121);
            assert_eq!(message, "Invalid symbol.");
        }
        other => panic!("expected exchange error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_error_uses_status_code() {
    let app = Router::new().route(
        "/api/v3/klines",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base = start(app).await;
    let client = BinanceClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client
        .klines("BTCUSDT", Interval::OneHour, 10)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Exchange { code: 503, ref message } if message == "maintenance"
    ));
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let app = Router::new().route(
        "/api/v3/klines",
        get(|| async { Json(serde_json::json!({"unexpected": true})) }),
    );
    let base = start(app).await;
    let client = BinanceClient::new(base, Duration::from_secs(5)).unwrap();

    let err = client
        .klines("BTCUSDT", Interval::OneHour, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
