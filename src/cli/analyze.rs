//! One-shot analysis of a single symbol.
//!
//! Fetches candles, prints the indicator snapshot and whatever signal the
//! enabled strategies produce. Nothing is sent to notifiers.

use tabled::{Table, Tabled};

use crate::app::{build_market_data, build_strategy_registry, Config};
use crate::cli::{output, AnalyzeArgs};
use crate::domain::{AnalysisContext, IndicatorSnapshot, MarketAnalyzer};
use crate::error::{Error, Result};

#[derive(Tabled)]
struct IndicatorRow {
    #[tabled(rename = "Indicator")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn indicator_rows(ind: &IndicatorSnapshot) -> Vec<IndicatorRow> {
    let row = |name, value: f64, precision: usize| IndicatorRow {
        name,
        value: format!("{value:.precision$}"),
    };
    vec![
        row("EMA short", ind.ema_short, 8),
        row("EMA medium", ind.ema_medium, 8),
        row("EMA long", ind.ema_long, 8),
        row("RSI", ind.rsi, 2),
        row("MACD", ind.macd, 8),
        row("MACD signal", ind.macd_signal, 8),
        row("BB upper", ind.bb_upper, 8),
        row("BB middle", ind.bb_middle, 8),
        row("BB lower", ind.bb_lower, 8),
        row("ATR", ind.atr, 8),
    ]
}

/// Execute the analyze command.
pub async fn execute(args: &AnalyzeArgs) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(interval) = args.interval {
        config.market_data.interval = interval;
    }
    if let Some(limit) = args.limit {
        config.market_data.limit = limit;
    }

    let symbol = args.symbol.trim().to_uppercase();
    let market = build_market_data(&config)?;
    let klines = market
        .klines(&symbol, config.market_data.interval, config.market_data.limit)
        .await?;

    let analyzer = MarketAnalyzer::new(config.analyzer.clone());
    let indicators = analyzer
        .snapshot(&klines)
        .ok_or_else(|| Error::InsufficientData {
            symbol: symbol.clone(),
            have: klines.len(),
        })?;

    output::section(&format!("{symbol} ({})", config.market_data.interval));
    if let Some(last) = klines.last() {
        output::field("Last close", last.close);
        output::field("Candle time", last.open_time.format("%Y-%m-%d %H:%M:%S"));
    }
    output::field("Candles", klines.len());
    println!();
    output::table(&Table::new(indicator_rows(&indicators)).to_string());

    let strategies = build_strategy_registry(&config);
    let ctx = AnalysisContext::new(&symbol, &klines, &indicators);
    output::section("Signal");
    match strategies.best(&ctx) {
        Some((strategy, signal)) => {
            output::field("Strategy", strategy);
            output::field("Direction", output::highlight(signal.direction));
            output::field("Entry", signal.entry);
            output::field("Stop loss", signal.stop_loss);
            output::field("Take profit", signal.take_profit);
            output::field("Risk", output::signed(-signal.risk()));
            output::field("Reward", output::signed(signal.reward()));
            output::field("Confidence", format!("{:.2}%", signal.confidence * 100.0));
            if signal.confidence <= config.monitor.min_confidence {
                output::warning("Below the confidence threshold; the monitor would not send it");
            }
        }
        None => output::note("No entry condition holds right now"),
    }
    Ok(())
}
