//! Strategy, notification and HTTP server settings.

use serde::Deserialize;

use crate::domain::strategy::TrendMomentumStrategy;

/// Which strategies to run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrategiesConfig {
    pub enabled: Vec<String>,
}

impl Default for StrategiesConfig {
    fn default() -> Self {
        Self {
            enabled: vec![TrendMomentumStrategy::NAME.to_string()],
        }
    }
}

/// Telegram notification configuration.
///
/// Credentials only come from `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramAppConfig {
    /// Use Telegram when credentials are present.
    pub enabled: bool,
    pub notify_signals: bool,
    pub notify_positions: bool,
    pub notify_lifecycle: bool,
    /// Delivery attempts per message.
    pub max_retries: u32,
    /// Delay before the first retry, doubled after each one.
    pub retry_base_delay_ms: u64,
    /// Alternative Bot API endpoint.
    pub api_url: Option<String>,
    #[serde(skip)]
    pub token: Option<String>,
    #[serde(skip)]
    /// Numeric chat id or `@channel` username.
    pub chat_id: Option<String>,
}

impl TelegramAppConfig {
    /// Token and chat id when Telegram is enabled and fully configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if !self.enabled {
            return None;
        }
        Some((self.token.as_deref()?, self.chat_id.as_deref()?))
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            notify_signals: true,
            notify_positions: true,
            notify_lifecycle: true,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            api_url: None,
            token: None,
            chat_id: None,
        }
    }
}

/// HTTP server answering the hosting platform's health probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".into(),
            port: 10000,
        }
    }
}
