//! Message formatting for Telegram notifications.
//!
//! Messages use Telegram's HTML parse mode.

use crate::domain::{Direction, ExitReason};
use crate::port::{Event, PositionEvent, SignalEvent};

use super::notifier::TelegramConfig;

/// Format an event into a Telegram message, or None if the event should be skipped.
#[must_use]
pub fn format_event_message(event: &Event, config: &TelegramConfig) -> Option<String> {
    match event {
        Event::Started { source } if config.notify_lifecycle => Some(format!(
            "🤖 Trading Bot Started\n\n👀 Watching: {}",
            escape_html(source)
        )),
        Event::Stopped if config.notify_lifecycle => Some("🛑 Trading Bot Stopped".to_string()),
        Event::SignalDetected(e) if config.notify_signals => Some(format_signal(e)),
        Event::PositionClosed(e) if config.notify_positions => Some(format_position(e)),
        _ => None,
    }
}

/// Format a detected signal.
#[must_use]
pub fn format_signal(event: &SignalEvent) -> String {
    let s = &event.signal;
    let emoji = match s.direction {
        Direction::Long => "🚀",
        Direction::Short => "🔻",
    };
    let ind = &s.indicators;

    format!(
        "{emoji} <b>Trading Signal - {symbol}</b>\n\
         \n\
         📊 Type: {direction}\n\
         💰 Price: {price:.8}\n\
         ✅ Entry: {entry:.8}\n\
         🛑 Stop Loss: {stop:.8}\n\
         🎯 Take Profit: {take:.8}\n\
         📈 Confidence: {stars} ({confidence:.2}%)\n\
         \n\
         📊 Indicators:\n\
         RSI: {rsi:.2}\n\
         MACD: {macd:.8}\n\
         BB Upper: {bb_upper:.8}\n\
         BB Lower: {bb_lower:.8}\n\
         \n\
         ⏰ {time}",
        symbol = escape_html(&s.symbol),
        direction = s.direction,
        price = s.price,
        entry = s.entry,
        stop = s.stop_loss,
        take = s.take_profit,
        stars = confidence_stars(s.confidence),
        confidence = s.confidence * 100.0,
        rsi = ind.rsi,
        macd = ind.macd,
        bb_upper = ind.bb_upper,
        bb_lower = ind.bb_lower,
        time = s.timestamp.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Format a closed market state.
#[must_use]
pub fn format_position(event: &PositionEvent) -> String {
    let (emoji, title) = match event.reason {
        ExitReason::TakeProfit => ("🎯", "Take Profit Hit"),
        ExitReason::StopLoss => ("🛑", "Stop Loss Hit"),
    };

    format!(
        "{emoji} <b>{title} - {symbol}</b>\n\
         \n\
         📊 Type: {direction}\n\
         ✅ Entry: {entry:.8}\n\
         🚪 Exit: {exit:.8}\n\
         📈 Change: {change:.2}%\n\
         \n\
         ⏱ Opened {opened}",
        symbol = escape_html(&event.symbol),
        direction = event.direction,
        entry = event.entry,
        exit = event.exit_price,
        change = event.change_pct,
        opened = event.opened_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// One star per fifth of confidence.
#[must_use]
pub fn confidence_stars(confidence: f64) -> String {
    let count = (confidence.clamp(0.0, 1.0) * 5.0).floor() as usize;
    "⭐".repeat(count)
}

/// Escape text for Telegram's HTML parse mode.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use crate::testkit::signal::signal;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn config() -> TelegramConfig {
        TelegramConfig::new("token", "42")
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("BTCUSDT"), "BTCUSDT");
        assert_eq!(escape_html("<b>&\"</b>"), "&lt;b&gt;&amp;&quot;&lt;/b&gt;");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_confidence_stars() {
        assert_eq!(confidence_stars(0.8), "⭐⭐⭐⭐");
        assert_eq!(confidence_stars(1.0), "⭐⭐⭐⭐⭐");
        assert_eq!(confidence_stars(0.19), "");
        assert_eq!(confidence_stars(3.0), "⭐⭐⭐⭐⭐");
    }

    #[test]
    fn test_signal_message_layout() {
        let mut s = signal("BTCUSDT", Direction::Long, dec!(100));
        s.timestamp = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let text = format_signal(&SignalEvent {
            signal: s,
            strategy: "trend_momentum".into(),
        });

        assert!(text.starts_with("🚀 <b>Trading Signal - BTCUSDT</b>\n\n"));
        assert!(text.contains("📊 Type: LONG\n"));
        assert!(text.contains("💰 Price: 100.00000000\n"));
        assert!(text.contains("🛑 Stop Loss: 97.00000000\n"));
        assert!(text.contains("🎯 Take Profit: 104.50000000\n"));
        assert!(text.contains("📈 Confidence: ⭐⭐⭐⭐ (80.00%)\n"));
        assert!(text.contains("RSI: 55.00\n"));
        assert!(text.ends_with("⏰ 2024-03-01 12:30:05"));
    }

    #[test]
    fn test_short_signal_uses_down_arrow() {
        let text = format_signal(&SignalEvent {
            signal: signal("ETHUSDT", Direction::Short, dec!(10)),
            strategy: "trend_momentum".into(),
        });
        assert!(text.starts_with("🔻 "));
        assert!(text.contains("📊 Type: SHORT\n"));
    }

    #[test]
    fn test_disabled_categories_are_skipped() {
        let mut config = config();
        config.notify_lifecycle = false;
        assert!(format_event_message(&Event::Stopped, &config).is_none());

        let started = Event::Started {
            source: "https://example.com/a?b=1&c=2".into(),
        };
        let text = format_event_message(&started, &TelegramConfig::new("t", "1")).unwrap();
        assert!(text.starts_with("🤖 Trading Bot Started"));
        assert!(text.contains("b=1&amp;c=2"));
    }
}
