//! Application wiring.
//!
//! Builds the adapters from configuration, starts the health server and
//! drives the monitor until shutdown.

mod builder;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use super::config::Config;
use super::monitor::{Monitor, MonitorSettings};
use super::state::MonitorState;
use crate::adapter::http;
use crate::domain::MarketAnalyzer;
use crate::error::Result;

pub(crate) use builder::{
    build_market_data, build_notifier_registry, build_strategy_registry, build_watchlist_source,
};
#[cfg(feature = "telegram")]
pub(crate) use builder::telegram_config;

/// Main application struct.
pub struct App;

impl App {
    /// Run until Ctrl-C or SIGTERM.
    pub async fn run(config: Config) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        });
        Self::run_with_shutdown(config, shutdown_rx).await
    }

    /// Run with externally controlled shutdown signal.
    pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
        let state = Arc::new(MonitorState::new());

        let server = if config.server.enabled {
            let listener = TcpListener::bind(config.server.bind_addr()).await?;
            let mut server_shutdown = shutdown.clone();
            let server_state = Arc::clone(&state);
            Some(tokio::spawn(async move {
                let signal = async move {
                    let _ = server_shutdown.wait_for(|stop| *stop).await;
                };
                if let Err(e) = http::serve(listener, server_state, signal).await {
                    error!(error = %e, "Health server failed");
                }
            }))
        } else {
            None
        };

        let source = build_watchlist_source(&config)?;
        let market = build_market_data(&config)?;
        let notifiers = Arc::new(build_notifier_registry(&config).await?);
        let strategies = build_strategy_registry(&config);
        info!(
            notifiers = ?notifiers.names(),
            exchange = market.exchange_name(),
            "Adapters initialized"
        );

        let mut monitor = Monitor::new(
            source,
            market,
            notifiers,
            MarketAnalyzer::new(config.analyzer.clone()),
            strategies,
            state,
            MonitorSettings::from_config(&config),
        );
        let result = monitor.run(shutdown).await;

        if let Some(handle) = server {
            handle.abort();
        }
        result
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(_) => {
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
