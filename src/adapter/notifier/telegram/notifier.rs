//! Telegram notification delivery.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use teloxide::{ApiError, RequestError};
use tracing::info;
use url::Url;

use super::format::format_event_message;
use crate::domain::RetryPolicy;
use crate::error::{Error, Result};
use crate::port::{Event, Notifier};

/// Configuration for the Telegram notifier.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat: a numeric id or an `@channel` username.
    pub chat_id: String,
    /// Send detected signals.
    pub notify_signals: bool,
    /// Send stop-loss / take-profit hits.
    pub notify_positions: bool,
    /// Send start and stop messages.
    pub notify_lifecycle: bool,
    /// Delivery retries for transient failures.
    pub retry: RetryPolicy,
    /// Alternative Bot API endpoint.
    pub api_url: Option<Url>,
}

impl TelegramConfig {
    /// Config with every notification category enabled.
    #[must_use]
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            notify_signals: true,
            notify_positions: true,
            notify_lifecycle: true,
            retry: RetryPolicy::default(),
            api_url: None,
        }
    }
}

/// Map a configured chat to a Bot API recipient.
pub fn recipient(chat_id: &str) -> Result<Recipient> {
    let chat_id = chat_id.trim();
    if let Ok(id) = chat_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }
    if chat_id.len() > 1 && chat_id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(chat_id.to_string()));
    }
    Err(Error::Notify(format!(
        "invalid chat id '{chat_id}': expected a number or an @channel username"
    )))
}

/// Whether a failed request is worth repeating.
///
/// Gateway pages that are not JSON and API errors Telegram does not
/// document are retried; known API rejections are not.
#[must_use]
pub fn is_transient(err: &RequestError) -> bool {
    matches!(
        err,
        RequestError::Network(_)
            | RequestError::Io(_)
            | RequestError::RetryAfter(_)
            | RequestError::InvalidJson { .. }
            | RequestError::Api(ApiError::Unknown(_))
    )
}

/// Telegram notifier that sends messages to a chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat: Recipient,
    config: TelegramConfig,
}

impl TelegramNotifier {
    /// Create a notifier without contacting Telegram.
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let chat = recipient(&config.chat_id)?;
        let mut bot = Bot::new(&config.bot_token);
        if let Some(url) = &config.api_url {
            bot = bot.set_api_url(url.clone());
        }
        Ok(Self { bot, chat, config })
    }

    /// Create a notifier after checking the credentials with `getMe`.
    ///
    /// Returns the bot's username alongside the notifier.
    pub async fn connect(config: TelegramConfig) -> Result<(Self, String)> {
        let notifier = Self::new(config)?;
        let me = notifier
            .bot
            .get_me()
            .await
            .map_err(|e| Error::Notify(format!("bot verification failed: {e}")))?;

        let username = me.user.username.clone().unwrap_or_default();
        info!(
            bot = %username,
            chat = %notifier.chat,
            "Telegram bot verified"
        );
        Ok((notifier, username))
    }

    #[must_use]
    pub const fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Send an HTML message, retrying transient failures.
    pub async fn send_text(&self, text: &str) -> Result<()> {
        let chat = &self.chat;
        self.config
            .retry
            .run("telegram send", is_transient, move || async move {
                self.bot
                    .send_message(chat.clone(), text)
                    .parse_mode(ParseMode::Html)
                    .await
            })
            .await?;

        info!(length = text.len(), "Telegram message sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, event: &Event) -> Result<()> {
        match format_event_message(event, &self.config) {
            Some(text) => self.send_text(&text).await,
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
