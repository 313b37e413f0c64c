//! Handler for the `run` command.

use tracing::info;

use crate::app::{App, Config};
use crate::cli::RunArgs;
use crate::error::{ConfigError, Result};

/// Apply command-line overrides on top of the loaded configuration.
#[allow(clippy::result_large_err)]
pub fn apply_overrides(config: &mut Config, args: &RunArgs) -> Result<()> {
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    if let Some(secs) = args.interval {
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "--interval",
                reason: "must be positive".into(),
            }
            .into());
        }
        config.monitor.poll_interval_secs = secs;
    }
    Ok(())
}

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    apply_overrides(&mut config, args)?;

    config.init_logging()?;
    info!(
        config = %args.config.display(),
        watchlist = %config.monitor.watchlist_url,
        strategies = ?config.strategies.enabled,
        version = env!("CARGO_PKG_VERSION"),
        "crypto-monitor starting"
    );

    App::run(config).await?;

    info!("crypto-monitor stopped");
    Ok(())
}
