//! Telegram notifications.

mod format;
mod notifier;

pub use format::{confidence_stars, escape_html, format_event_message, format_position, format_signal};
pub use notifier::{is_transient, TelegramConfig, TelegramNotifier};
