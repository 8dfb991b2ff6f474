//! Downloading the S&P 500 roster page.
use log::info;
use reqwest::blocking::Client;
use screener_common::roster::{RosterLayout, parse_roster};
use screener_common::{Result, ScreenerError, Ticker};

use crate::http;

/// Fetch `url` and extract the ticker column described by `layout`.
pub fn fetch_roster(client: &Client, url: &str, layout: &RosterLayout) -> Result<Vec<Ticker>> {
    info!("Fetching roster from {}", url);
    let html = http::get_text(client, url, &[])?;
    let tickers = parse_roster(&html, layout)?;

    if tickers.is_empty() {
        return Err(ScreenerError::roster(format!(
            "no symbols found in table {} of {}",
            layout.table_index, url
        )));
    }
    info!("Roster has {} symbols", tickers.len());
    Ok(tickers)
}
