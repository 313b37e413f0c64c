//! Monitor wired to in-memory doubles.

use std::sync::Arc;
use std::time::Duration;

use crypto_monitor::adapter::notifier::NotifierRegistry;
use crypto_monitor::app::{Monitor, MonitorSettings, MonitorState};
use crypto_monitor::domain::{MarketAnalyzer, Strategy, StrategyRegistry, TrendMomentumStrategy};
use crypto_monitor::testkit::source::{RecordingNotifier, ScriptedWatchlist, StaticMarketData};

pub struct Harness {
    pub monitor: Monitor,
    pub source: ScriptedWatchlist,
    pub market: StaticMarketData,
    pub notifier: RecordingNotifier,
    pub state: Arc<MonitorState>,
}

/// Settings with millisecond pauses so loops finish quickly.
pub fn fast_settings() -> MonitorSettings {
    MonitorSettings {
        poll_interval: Duration::from_millis(10),
        error_backoff: Duration::from_millis(5),
        ..MonitorSettings::default()
    }
}

pub fn harness(strategy: Box<dyn Strategy>, settings: MonitorSettings) -> Harness {
    let source = ScriptedWatchlist::new();
    let market = StaticMarketData::new();
    let notifier = RecordingNotifier::new();
    let state = Arc::new(MonitorState::new());

    let mut notifiers = NotifierRegistry::new();
    notifiers.register(Box::new(notifier.clone()));

    let mut strategies = StrategyRegistry::new();
    strategies.register(strategy);

    let monitor = Monitor::new(
        Arc::new(source.clone()),
        Arc::new(market.clone()),
        Arc::new(notifiers),
        MarketAnalyzer::default(),
        strategies,
        Arc::clone(&state),
        settings,
    );

    Harness {
        monitor,
        source,
        market,
        notifier,
        state,
    }
}

/// Harness running the default trend/momentum rule.
pub fn trend_harness() -> Harness {
    harness(
        Box::new(TrendMomentumStrategy::new(Default::default())),
        fast_settings(),
    )
}
