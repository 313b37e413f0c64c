//! Watchlist page model and parser.
//!
//! The watchlist page lists assets in an HTML table (class `table`): the
//! first cell of each row is the base asset, the second the number of
//! pings it has received. The header row is skipped.

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};

/// One row of the watchlist table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchEntry {
    /// Base asset as shown on the page (e.g. `BTC`).
    pub asset: String,
    /// Number of pings reported for the asset.
    pub pings: u32,
}

impl WatchEntry {
    #[must_use]
    pub fn new(asset: impl Into<String>, pings: u32) -> Self {
        Self {
            asset: asset.into(),
            pings,
        }
    }

    /// Exchange symbol for this asset quoted in `quote` (e.g. `BTCUSDT`).
    #[must_use]
    pub fn symbol(&self, quote: &str) -> String {
        format!("{}{}", self.asset.trim(), quote.trim()).to_uppercase()
    }

    /// Whether the asset has been pinged often enough to analyze.
    #[must_use]
    pub const fn is_hot(&self, min_pings: u32) -> bool {
        self.pings >= min_pings
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("invalid selector '{css}': {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse the watchlist table out of a page.
///
/// Rows with fewer than two cells are ignored; rows whose ping count is not
/// a number are skipped with a warning. A page without the table is an
/// error.
pub fn parse_watchlist(html: &str) -> Result<Vec<WatchEntry>> {
    let document = Html::parse_document(html);
    let table_sel = selector(".table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| Error::Watchlist("watchlist table not found on page".into()))?;

    let mut entries = Vec::new();
    for row in table.select(&row_sel).skip(1) {
        let cells: Vec<_> = row.select(&cell_sel).collect();
        if cells.len() < 2 {
            continue;
        }

        let asset = cell_text(cells[0]);
        let raw_pings = cell_text(cells[1]);
        if asset.is_empty() {
            continue;
        }

        match raw_pings.parse::<u32>() {
            Ok(pings) => entries.push(WatchEntry::new(asset, pings)),
            Err(_) => {
                warn!(asset = %asset, pings = %raw_pings, "Skipping row with invalid ping count");
            }
        }
    }

    Ok(entries)
}
