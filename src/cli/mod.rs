//! Command-line interface definitions.

pub mod analyze;
pub mod check;
pub mod output;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::config::DEFAULT_CONFIG_PATH;
use crate::domain::Interval;

/// Crypto Monitor - watchlist-driven trading signals for Telegram.
#[derive(Parser, Debug)]
#[command(name = "crypto-monitor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitor (foreground)
    Run(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Analyze one symbol and print its indicators and signal
    Analyze(AnalyzeArgs),
}

/// Subcommands for `crypto-monitor check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration and environment
    Config(ConfigPathArg),
    /// Verify the bot token and send a test message
    Telegram(ConfigPathArg),
    /// Fetch the watchlist once and print it
    Watchlist(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,

    /// Override seconds between watchlist checks
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,

    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Candle interval (defaults to the configured one)
    #[arg(short, long)]
    pub interval: Option<Interval>,

    /// Number of candles to fetch (defaults to the configured one)
    #[arg(short, long)]
    pub limit: Option<u16>,
}
