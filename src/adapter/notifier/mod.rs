//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for various notification backends.

#[cfg(feature = "telegram")]
pub mod telegram;

#[cfg(feature = "telegram")]
pub use telegram::{TelegramConfig, TelegramNotifier};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;
use crate::port::{Event, Notifier};

/// Registry of notifiers.
#[derive(Default)]
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Deliver an event to every notifier, in registration order.
    ///
    /// Returns `true` only if every notifier delivered it. Failures are
    /// logged and do not stop delivery to the rest.
    pub async fn notify_all(&self, event: &Event) -> bool {
        let mut delivered = true;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(event).await {
                warn!(notifier = notifier.name(), error = %e, "Notification failed");
                delivered = false;
            }
        }
        delivered
    }

    /// Names of registered notifiers.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: &Event) -> Result<()> {
        match event {
            Event::Started { source } => {
                info!(source = %source, "Monitor started");
            }
            Event::SignalDetected(e) => {
                let s = &e.signal;
                info!(
                    symbol = %s.symbol,
                    direction = %s.direction,
                    price = %s.price,
                    stop_loss = %s.stop_loss,
                    take_profit = %s.take_profit,
                    confidence = s.confidence,
                    strategy = %e.strategy,
                    "Signal detected"
                );
            }
            Event::PositionClosed(e) => {
                info!(
                    symbol = %e.symbol,
                    direction = %e.direction,
                    reason = %e.reason,
                    exit_price = %e.exit_price,
                    change_pct = %e.change_pct.round_dp(2),
                    "Position closed"
                );
            }
            Event::Stopped => {
                info!("Monitor stopped");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
