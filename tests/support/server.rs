//! Local HTTP servers standing in for the watchlist page and Binance.

use axum::Router;
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn start(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

/// A watchlist page in the shape the monitor expects.
pub fn watchlist_html(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(asset, pings)| format!("<tr><td>{asset}</td><td>{pings}</td><td>1.2%</td></tr>"))
        .collect();
    format!(
        "<html><body><table class=\"table table-striped\">\
         <tr><th>Asset</th><th>Pings</th><th>Change</th></tr>{body}</table></body></html>"
    )
}

/// Binance kline rows for the given closes, as the REST API returns them.
pub fn kline_rows(closes: &[f64]) -> serde_json::Value {
    let start = 1_704_067_200_000_i64;
    let rows: Vec<serde_json::Value> = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let open_time = start + i as i64 * 300_000;
            serde_json::json!([
                open_time,
                format!("{close:.8}"),
                format!("{:.8}", close + 0.5),
                format!("{:.8}", close - 0.5),
                format!("{close:.8}"),
                "100.00000000",
                open_time + 299_999,
                "10000.00000000",
                42,
                "50.00000000",
                "5000.00000000",
                "0"
            ])
        })
        .collect();
    serde_json::Value::Array(rows)
}
