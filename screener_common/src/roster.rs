//! Extracting a column of ticker symbols from an HTML table.
//!
//! The roster page is fetched by the client; this module only deals with the
//! markup so it can be exercised offline.
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::error::ScreenerError;
use crate::result::Result;
use crate::tickers::Ticker;

/// Wikipedia's constituents list, which keeps the symbol in the first column.
pub const DEFAULT_ROSTER_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

/// Where the symbols live in the roster page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLayout {
    /// Zero-based index of the `<table>` in document order.
    pub table_index: usize,
    /// Candidate cell columns; the first non-empty one in a row wins.
    pub symbol_columns: Vec<usize>,
    /// Leading rows to ignore (headers).
    pub skip_rows: usize,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            table_index: 0,
            symbol_columns: vec![0],
            skip_rows: 1,
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScreenerError::roster(format!("invalid selector {css:?}: {e:?}")))
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse the roster table out of `html`.
///
/// Rows without a usable symbol are skipped with a warning; repeated symbols
/// are kept once, at their first position.
pub fn parse_roster(html: &str, layout: &RosterLayout) -> Result<Vec<Ticker>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let table = document.select(&table_sel).nth(layout.table_index).ok_or_else(|| {
        ScreenerError::roster(format!("page has no table at index {}", layout.table_index))
    })?;

    let mut seen = HashSet::new();
    let mut tickers = Vec::new();

    for (i, row) in table.select(&row_sel).enumerate().skip(layout.skip_rows) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        if cells.is_empty() {
            continue;
        }

        let symbol = layout
            .symbol_columns
            .iter()
            .filter_map(|&col| cells.get(col))
            .map(cell_text)
            .find(|text| !text.is_empty());

        let Some(symbol) = symbol else {
            warn!("Roster row {} has no symbol in columns {:?}", i, layout.symbol_columns);
            continue;
        };

        match symbol.parse::<Ticker>() {
            Ok(ticker) => {
                if seen.insert(ticker.clone()) {
                    tickers.push(ticker);
                } else {
                    debug!("Duplicate roster symbol {}", ticker);
                }
            }
            Err(e) => warn!("Skipping roster row {}: {}", i, e),
        }
    }

    Ok(tickers)
}
