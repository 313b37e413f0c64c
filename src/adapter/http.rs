//! HTTP endpoints for the hosting platform.
//!
//! `GET /` answers the platform's liveness probe; `GET /health` returns the
//! monitor's counters as JSON.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::info;

use crate::app::{MonitorState, StatusSnapshot};
use crate::error::Result;

/// Body of the liveness response.
pub const ALIVE_MESSAGE: &str = "Bot is running!";

/// Routes served by the health server.
pub fn router(state: Arc<MonitorState>) -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/health", get(health))
        .with_state(state)
}

async fn alive() -> &'static str {
    ALIVE_MESSAGE
}

async fn health(State(state): State<Arc<MonitorState>>) -> Json<StatusSnapshot> {
    Json(state.snapshot())
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<MonitorState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "Health server listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn start(state: Arc<MonitorState>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, state, std::future::pending()));
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_root_reports_alive() {
        let base = start(Arc::new(MonitorState::new())).await;
        let body = reqwest::get(format!("{base}/")).await.unwrap().text().await.unwrap();
        assert_eq!(body, ALIVE_MESSAGE);
    }

    #[tokio::test]
    async fn test_health_returns_counters() {
        let state = Arc::new(MonitorState::new());
        state.record_cycle_success();
        state.record_signal_sent();

        let base = start(state).await;
        let json: serde_json::Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(json["cycles_completed"], 1);
        assert_eq!(json["signals_sent"], 1);
        assert_eq!(json["tracked"], serde_json::json!([]));
    }
}
