//! Per-symbol notification rate limiting.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Remembers when each symbol was last announced.
#[derive(Debug)]
pub struct NotificationThrottle {
    min_interval: Duration,
    max_age: Duration,
    last_sent: HashMap<String, Instant>,
}

impl NotificationThrottle {
    #[must_use]
    pub fn new(min_interval: Duration, max_age: Duration) -> Self {
        Self {
            min_interval,
            max_age,
            last_sent: HashMap::new(),
        }
    }

    /// Whether `symbol` may be announced at `now`.
    #[must_use]
    pub fn can_send(&self, symbol: &str, now: Instant) -> bool {
        match self.last_sent.get(symbol) {
            Some(last) => now.saturating_duration_since(*last) >= self.min_interval,
            None => true,
        }
    }

    /// Record a delivered announcement.
    pub fn record(&mut self, symbol: &str, now: Instant) {
        self.last_sent.insert(symbol.to_string(), now);
    }

    /// Forget symbols last announced `max_age` ago or earlier.
    pub fn cleanup(&mut self, now: Instant) {
        let max_age = self.max_age;
        self.last_sent
            .retain(|_, last| now.saturating_duration_since(*last) < max_age);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last_sent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_sent.is_empty()
    }
}

impl Default for NotificationThrottle {
    fn default() -> Self {
        Self::new(Duration::from_secs(300), Duration::from_secs(3600))
    }
}
