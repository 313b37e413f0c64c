//! Monitor loop integration tests against in-memory doubles.

mod support;

use std::time::Duration;

use rust_decimal_macros::dec;
use tokio::sync::watch;

use crypto_monitor::domain::{Direction, ExitReason, WatchEntry};
use crypto_monitor::error::Error;
use crypto_monitor::port::Event;
use crypto_monitor::testkit::kline::{falling_zigzag, flat, rising_zigzag, series};
use crypto_monitor::testkit::source::FixedStrategy;

use support::monitor::{fast_settings, harness, trend_harness};

fn entries(rows: &[(&str, u32)]) -> Vec<WatchEntry> {
    rows.iter()
        .map(|(asset, pings)| WatchEntry::new(*asset, *pings))
        .collect()
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn test_only_hot_symbols_are_analyzed() {
    let mut h = trend_harness();
    h.source
        .push(Ok(entries(&[("btc", 5), ("eth", 2), ("sol", 4)])));
    h.market.set("BTCUSDT", series(&rising_zigzag(100)));
    h.market.set("ETHUSDT", series(&rising_zigzag(100)));
    h.market.set("SOLUSDT", series(&flat(100, 20.0)));

    let report = h.monitor.run_cycle().await.unwrap();

    assert_eq!(report.watched, 3);
    assert_eq!(report.hot, 2);
    assert_eq!(report.analyzed, 2);
    assert_eq!(report.signals, 1);
    assert_eq!(report.sent, 1);
    assert_eq!(h.market.calls(), 2);

    let signals = h.notifier.signals();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].symbol, "BTCUSDT");
    assert_eq!(signals[0].direction, Direction::Long);
    assert!(signals[0].stop_loss < signals[0].entry);
    assert!(signals[0].take_profit > signals[0].entry);
    assert!(h.state.positions().get("BTCUSDT").is_some());
}

#[tokio::test]
async fn test_falling_market_produces_short() {
    let mut h = trend_harness();
    h.source.push(Ok(entries(&[("ada", 7)])));
    h.market.set("ADAUSDT", series(&falling_zigzag(100)));

    h.monitor.run_cycle().await.unwrap();

    let signals = h.notifier.signals();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].direction, Direction::Short);
    assert!(signals[0].stop_loss > signals[0].entry);
    assert!(signals[0].take_profit < signals[0].entry);
}

#[tokio::test]
async fn test_repeat_signal_is_throttled() {
    let mut h = trend_harness();
    let list = entries(&[("btc", 5)]);
    h.source.push(Ok(list.clone()));
    h.source.push(Ok(list));
    h.market.set("BTCUSDT", series(&rising_zigzag(100)));

    let first = h.monitor.run_cycle().await.unwrap();
    let second = h.monitor.run_cycle().await.unwrap();

    assert_eq!((first.signals, first.sent), (1, 1));
    assert_eq!((second.signals, second.sent), (1, 0));
    assert_eq!(h.notifier.signals().len(), 1);

    // Same direction again: the entry is appended to the tracked state
    let positions = h.state.positions();
    assert_eq!(positions.get("BTCUSDT").unwrap().entry_points.len(), 2);
}

#[tokio::test]
async fn test_failed_delivery_is_retried_next_cycle() {
    let mut h = trend_harness();
    h.source.push(Ok(entries(&[("btc", 5)])));
    h.market.set("BTCUSDT", series(&rising_zigzag(100)));

    h.notifier.set_failing(true);
    let first = h.monitor.run_cycle().await.unwrap();
    assert_eq!((first.signals, first.sent), (1, 0));

    h.notifier.set_failing(false);
    let second = h.monitor.run_cycle().await.unwrap();
    assert_eq!(second.sent, 1);
    assert_eq!(h.notifier.signals().len(), 1);

    let snapshot = h.state.snapshot();
    assert_eq!(snapshot.signals_detected, 2);
    assert_eq!(snapshot.signals_sent, 1);
}

#[tokio::test]
async fn test_confidence_must_exceed_threshold() {
    let mut at_threshold = harness(Box::new(FixedStrategy::long(0.6, dec!(5))), fast_settings());
    at_threshold.source.push(Ok(entries(&[("btc", 5)])));
    at_threshold.market.set("BTCUSDT", series(&flat(60, 100.0)));
    let report = at_threshold.monitor.run_cycle().await.unwrap();
    assert_eq!(report.signals, 0);
    assert!(at_threshold.notifier.is_empty());
    assert!(at_threshold.state.positions().is_empty());

    let mut above = harness(Box::new(FixedStrategy::long(0.61, dec!(5))), fast_settings());
    above.source.push(Ok(entries(&[("btc", 5)])));
    above.market.set("BTCUSDT", series(&flat(60, 100.0)));
    let report = above.monitor.run_cycle().await.unwrap();
    assert_eq!(report.sent, 1);
}

#[tokio::test]
async fn test_symbol_errors_do_not_fail_the_cycle() {
    let mut h = trend_harness();
    h.source
        .push(Ok(entries(&[("xyz", 9), ("short", 9), ("btc", 5)])));
    h.market.set("SHORTUSDT", series(&rising_zigzag(20)));
    h.market.set("BTCUSDT", series(&rising_zigzag(100)));

    let report = h.monitor.run_cycle().await.unwrap();

    assert_eq!(report.hot, 3);
    assert_eq!(report.failed, 2);
    assert_eq!(report.analyzed, 1);
    assert_eq!(report.sent, 1);
}

#[tokio::test]
async fn test_watchlist_failure_fails_the_cycle() {
    let mut h = trend_harness();
    h.source
        .push(Err(Error::Watchlist("table not found".into())));

    let result = h.monitor.run_cycle().await;
    assert!(matches!(result, Err(Error::Watchlist(_))));
    assert!(h.notifier.is_empty());
}

#[tokio::test]
async fn test_take_profit_closes_tracked_state() {
    let mut h = harness(Box::new(FixedStrategy::long(0.8, dec!(5))), fast_settings());
    let list = entries(&[("btc", 5)]);
    h.source.push(Ok(list.clone()));
    h.source.push(Ok(list));

    h.market.set("BTCUSDT", series(&flat(60, 100.0)));
    h.monitor.run_cycle().await.unwrap();
    {
        let positions = h.state.positions();
        let state = positions.get("BTCUSDT").unwrap();
        assert_eq!(state.stop_loss, dec!(95));
        assert_eq!(state.take_profit, dec!(105));
    }

    let mut closes = flat(59, 100.0);
    closes.push(106.0);
    h.market.set("BTCUSDT", series(&closes));
    let report = h.monitor.run_cycle().await.unwrap();
    assert_eq!(report.closed, 1);

    let closed: Vec<_> = h
        .notifier
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::PositionClosed(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].reason, ExitReason::TakeProfit);
    assert_eq!(closed[0].entry, dec!(100));
    assert_eq!(closed[0].exit_price, dec!(106));
    assert_eq!(closed[0].change_pct, dec!(6));

    // The new signal at 106 is throttled but tracked afresh
    assert_eq!(report.sent, 0);
    assert_eq!(h.state.snapshot().positions_closed, 1);
    assert_eq!(
        h.state.positions().get("BTCUSDT").unwrap().entry_points,
        vec![dec!(106)]
    );
}

#[tokio::test]
async fn test_run_announces_lifecycle_and_stops_on_shutdown() {
    let h = trend_harness();
    let source = h.source.clone();
    let notifier = h.notifier.clone();
    let state = h.state.clone();
    h.source.push(Ok(entries(&[("btc", 5)])));
    h.market.set("BTCUSDT", series(&rising_zigzag(100)));

    let (tx, rx) = watch::channel(false);
    let mut monitor = h.monitor;
    let task = tokio::spawn(async move { monitor.run(rx).await });

    wait_until(|| state.snapshot().cycles_completed >= 2).await;
    tx.send(true).unwrap();
    task.await.unwrap().unwrap();

    assert_eq!(source.opens(), 1);
    assert_eq!(source.closes(), 1);

    let events = notifier.events();
    assert!(matches!(events.first(), Some(Event::Started { source }) if source == "scripted"));
    assert!(matches!(events.last(), Some(Event::Stopped)));
    assert_eq!(notifier.signals().len(), 1);
}

#[tokio::test]
async fn test_run_backs_off_after_failed_cycle() {
    let h = trend_harness();
    let state = h.state.clone();
    h.source
        .push(Err(Error::Watchlist("page timed out".into())));
    h.source.push(Ok(entries(&[("btc", 1)])));

    let (tx, rx) = watch::channel(false);
    let mut monitor = h.monitor;
    let task = tokio::spawn(async move { monitor.run(rx).await });

    wait_until(|| {
        let s = state.snapshot();
        s.cycles_failed >= 1 && s.cycles_completed >= 1
    })
    .await;
    drop(tx);
    task.await.unwrap().unwrap();

    let snapshot = state.snapshot();
    assert!(snapshot.last_error.is_none());
    assert!(snapshot.last_cycle_at.is_some());
}
