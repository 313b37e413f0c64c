//! The polling loop.
//!
//! Each cycle reads the watchlist, analyzes every hot symbol and announces
//! qualifying signals. Tracked market states are refreshed with the latest
//! close on every pass so stop and target hits are announced too.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::config::Config;
use super::state::MonitorState;
use super::throttle::NotificationThrottle;
use crate::adapter::notifier::NotifierRegistry;
use crate::domain::{
    AnalysisContext, Interval, MarketAnalyzer, StrategyRegistry, TrackOutcome, TradingSignal,
};
use crate::error::{Error, Result};
use crate::port::{Event, MarketData, PositionEvent, SignalEvent, WatchlistSource};

/// Loop settings taken from [`Config`].
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub min_pings: u32,
    pub quote_asset: String,
    pub min_confidence: f64,
    pub interval: Interval,
    pub limit: u16,
    pub poll_interval: Duration,
    pub error_backoff: Duration,
    pub notify_interval: Duration,
    pub history_max_age: Duration,
}

impl MonitorSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_pings: config.monitor.min_pings,
            quote_asset: config.monitor.quote_asset.clone(),
            min_confidence: config.monitor.min_confidence,
            interval: config.market_data.interval,
            limit: config.market_data.limit,
            poll_interval: config.monitor.poll_interval(),
            error_backoff: config.monitor.error_backoff(),
            notify_interval: config.monitor.notify_interval(),
            history_max_age: config.monitor.history_max_age(),
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What one symbol produced during a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolOutcome {
    /// A tracked state for the symbol hit its stop or target.
    pub closed: bool,
    /// A signal passed the confidence filter.
    pub signal: bool,
    /// The signal was delivered to every notifier.
    pub sent: bool,
    /// The signal was held back by the per-symbol throttle.
    pub throttled: bool,
}

/// Totals for one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub watched: usize,
    pub hot: usize,
    pub analyzed: usize,
    pub failed: usize,
    pub signals: usize,
    pub sent: usize,
    pub closed: usize,
}

/// Watches a watchlist and announces signals for hot symbols.
pub struct Monitor {
    source: Arc<dyn WatchlistSource>,
    market: Arc<dyn MarketData>,
    notifiers: Arc<NotifierRegistry>,
    analyzer: MarketAnalyzer,
    strategies: StrategyRegistry,
    throttle: NotificationThrottle,
    state: Arc<MonitorState>,
    settings: MonitorSettings,
}

impl Monitor {
    #[must_use]
    pub fn new(
        source: Arc<dyn WatchlistSource>,
        market: Arc<dyn MarketData>,
        notifiers: Arc<NotifierRegistry>,
        analyzer: MarketAnalyzer,
        strategies: StrategyRegistry,
        state: Arc<MonitorState>,
        settings: MonitorSettings,
    ) -> Self {
        let throttle =
            NotificationThrottle::new(settings.notify_interval, settings.history_max_age);
        Self {
            source,
            market,
            notifiers,
            analyzer,
            strategies,
            throttle,
            state,
            settings,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<MonitorState> {
        &self.state
    }

    /// Run until `shutdown` turns true or its sender is dropped.
    ///
    /// The source is opened first and closed on the way out; `Started` and
    /// `Stopped` are announced around the loop.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        self.source.open().await?;
        let source = self.source.describe();
        info!(
            source = %source,
            strategies = ?self.strategies.names(),
            poll_secs = self.settings.poll_interval.as_secs(),
            "Monitor started"
        );
        self.notifiers.notify_all(&Event::Started { source }).await;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let pause = match self.run_cycle().await {
                Ok(report) => {
                    self.state.record_cycle_success();
                    info!(
                        hot = report.hot,
                        analyzed = report.analyzed,
                        signals = report.signals,
                        sent = report.sent,
                        closed = report.closed,
                        "Cycle complete"
                    );
                    self.settings.poll_interval
                }
                Err(e) => {
                    warn!(error = %e, "Cycle failed");
                    self.state.record_cycle_failure(e.to_string());
                    self.settings.error_backoff
                }
            };

            tokio::select! {
                () = tokio::time::sleep(pause) => {}
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }
        }

        if let Err(e) = self.source.close().await {
            warn!(error = %e, "Failed to close watchlist source");
        }
        self.notifiers.notify_all(&Event::Stopped).await;
        info!("Monitor stopped");
        Ok(())
    }

    /// Read the watchlist once and process every hot symbol.
    ///
    /// Only a watchlist failure fails the cycle; per-symbol errors are
    /// logged and counted.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let entries = self.source.fetch().await?;
        let mut report = CycleReport {
            watched: entries.len(),
            ..CycleReport::default()
        };

        let min_pings = self.settings.min_pings;
        for entry in entries.iter().filter(|e| e.is_hot(min_pings)) {
            report.hot += 1;
            let symbol = entry.symbol(&self.settings.quote_asset);
            debug!(symbol = %symbol, pings = entry.pings, "Hot symbol");

            match self.process_symbol(&symbol).await {
                Ok(outcome) => {
                    report.analyzed += 1;
                    report.closed += usize::from(outcome.closed);
                    report.signals += usize::from(outcome.signal);
                    report.sent += usize::from(outcome.sent);
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(symbol = %symbol, error = %e, "Failed to process symbol");
                }
            }
        }

        self.throttle.cleanup(Instant::now());
        Ok(report)
    }

    /// Analyze one symbol and announce what it produced.
    pub async fn process_symbol(&mut self, symbol: &str) -> Result<SymbolOutcome> {
        let klines = self
            .market
            .klines(symbol, self.settings.interval, self.settings.limit)
            .await?;
        let insufficient = || Error::InsufficientData {
            symbol: symbol.to_string(),
            have: klines.len(),
        };

        let price = klines.last().map(|k| k.close).ok_or_else(insufficient)?;
        let mut outcome = SymbolOutcome::default();

        let closed = self.state.positions_mut().update(symbol, price);
        if let Some((market_state, reason)) = closed {
            outcome.closed = true;
            self.state.record_position_closed();
            info!(symbol, reason = %reason, price = %price, "Tracked state closed");
            let event = Event::PositionClosed(PositionEvent::new(&market_state, reason));
            self.notifiers.notify_all(&event).await;
        }

        let indicators = self.analyzer.snapshot(&klines).ok_or_else(insufficient)?;
        let ctx = AnalysisContext::new(symbol, &klines, &indicators);
        let Some((strategy, signal)) = self.strategies.best(&ctx) else {
            debug!(symbol, rsi = indicators.rsi, "No signal");
            return Ok(outcome);
        };

        if signal.confidence <= self.settings.min_confidence {
            debug!(
                symbol,
                confidence = signal.confidence,
                "Signal below confidence threshold"
            );
            return Ok(outcome);
        }

        outcome.signal = true;
        self.state.record_signal_detected();

        let now = Instant::now();
        if self.throttle.can_send(symbol, now) {
            outcome.sent = self.announce(strategy, &signal).await;
            if outcome.sent {
                self.throttle.record(symbol, now);
                self.state.record_signal_sent();
            }
        } else {
            outcome.throttled = true;
            debug!(symbol, "Signal throttled");
        }

        match self.state.positions_mut().track(&signal) {
            TrackOutcome::Opened => debug!(symbol, direction = %signal.direction, "Tracking"),
            TrackOutcome::Added => debug!(symbol, entry = %signal.entry, "Entry added"),
            TrackOutcome::Ignored => {
                debug!(symbol, "Opposite signal for tracked symbol ignored");
            }
        }

        Ok(outcome)
    }

    async fn announce(&self, strategy: &str, signal: &TradingSignal) -> bool {
        let event = Event::SignalDetected(SignalEvent {
            signal: signal.clone(),
            strategy: strategy.to_string(),
        });
        self.notifiers.notify_all(&event).await
    }
}
