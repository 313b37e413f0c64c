use std::path::Path;

use crate::app::Config;
use crate::error::Result;

/// Verify the bot token and send a test message to the configured chat.
#[cfg(feature = "telegram")]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    use crate::adapter::notifier::telegram::escape_html;
    use crate::adapter::notifier::TelegramNotifier;
    use crate::app::telegram_config;
    use crate::cli::output;
    use crate::error::ConfigError;

    let config = Config::load_or_default(config_path)?;
    let tg_config = telegram_config(&config)?.ok_or(ConfigError::MissingField {
        field: "TELEGRAM_TOKEN and TELEGRAM_CHAT_ID environment variables",
    })?;

    output::section("Telegram Check");
    output::field("Bot token", output::mask(&tg_config.bot_token));
    output::field("Chat ID", &tg_config.chat_id);

    let (notifier, username) = TelegramNotifier::connect(tg_config).await?;
    output::success(&format!("Bot verified: @{username}"));

    let message = format!(
        "🧪 <b>Crypto Monitor Test Message</b>\n\n\
         Configuration validated!\n\n\
         👀 Watching: {}\n\
         📊 Strategies: {}",
        escape_html(&config.monitor.watchlist_url),
        escape_html(&config.strategies.enabled.join(", ")),
    );
    notifier.send_text(&message).await?;

    output::success("Telegram test message sent");
    output::note("Check Telegram for the message.");
    Ok(())
}

/// Verify the bot token and send a test message to the configured chat.
#[cfg(not(feature = "telegram"))]
pub async fn execute_telegram<P: AsRef<Path>>(config_path: P) -> Result<()> {
    use crate::error::ConfigError;

    let _ = Config::load_or_default(config_path)?;
    Err(ConfigError::InvalidValue {
        field: "telegram",
        reason: "built without the telegram feature".into(),
    }
    .into())
}
