use std::path::Path;

use tabled::{Table, Tabled};

use crate::app::{build_watchlist_source, Config};
use crate::cli::output;
use crate::domain::WatchEntry;
use crate::error::Result;

#[derive(Tabled)]
struct WatchRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Pings")]
    pings: u32,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Hot")]
    hot: &'static str,
}

fn rows(entries: &[WatchEntry], quote: &str, min_pings: u32) -> Vec<WatchRow> {
    entries
        .iter()
        .map(|e| WatchRow {
            asset: e.asset.clone(),
            pings: e.pings,
            symbol: e.symbol(quote),
            hot: if e.is_hot(min_pings) { "✓" } else { "" },
        })
        .collect()
}

/// Fetch the watchlist once and print it.
pub async fn execute_watchlist<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let source = build_watchlist_source(&config)?;

    output::section("Watchlist Check");
    output::field("Source", source.describe());

    source.open().await?;
    let fetched = source.fetch().await;
    if let Err(e) = source.close().await {
        output::warning(&format!("Failed to close source: {e}"));
    }
    let entries = fetched?;

    let min_pings = config.monitor.min_pings;
    let hot = entries.iter().filter(|e| e.is_hot(min_pings)).count();
    output::success(&format!(
        "{} rows, {} with at least {} pings",
        entries.len(),
        hot,
        min_pings
    ));

    if !entries.is_empty() {
        println!();
        let table = Table::new(rows(&entries, &config.monitor.quote_asset, min_pings)).to_string();
        output::table(&table);
    }
    Ok(())
}
