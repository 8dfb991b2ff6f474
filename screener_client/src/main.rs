//! Stock screener. Fetches quotes and recent daily prices for a list of tickers,
//! scores them with a few value heuristics (Graham intrinsic value, RIV, average
//! daily range, P/E, dividend yield) and prints the ones worth a closer look.
//!
//! Usage example (CLI):
//! ```bash
//! screener KO PEP XOM
//! screener 500 --max-pe 18
//! screener --path ./tickers.txt
//! ```
//!
//! The report goes to stdout; diagnostics go to stderr through `env_logger`
//! (`RUST_LOG=debug` shows every request).
#![warn(missing_docs)]
mod args;
mod http;
mod roster;
mod screener;
mod yahoo;

use crate::args::Args;
use crate::screener::{Screener, write_summary};
use crate::yahoo::YahooClient;
use chrono::Local;
use clap::Parser;
use log::info;
use reqwest::blocking::Client;
use screener_common::tickers::TickerParser;
use screener_common::{Result, ScreenerError, Ticker};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind};
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

fn main() -> Result<(), ScreenerError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Finishing current ticker...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| ScreenerError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let client = http::build_client(args.timeout())?;
    let tickers = collect_tickers(&args, &client)?;
    if tickers.is_empty() {
        return Err(ScreenerError::NoTickers);
    }
    info!("Screening {} tickers", tickers.len());

    let yahoo = YahooClient::new(client, args.yahoo_config());
    let screener = Screener::new(yahoo, args.screen_config(), Local::now().date_naive());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = screener.run(&tickers, &mut out, &shutdown)?;
    write_summary(&mut out, &report)?;

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Positional tickers (or the roster), then the ticker file, without duplicates.
fn collect_tickers(args: &Args, client: &Client) -> Result<Vec<Ticker>> {
    let mut tickers = if args.wants_roster() {
        roster::fetch_roster(client, &args.roster_url, &args.roster_layout())?
    } else {
        args.tickers.clone()
    };

    if let Some(raw) = &args.path {
        let file_path = normalize_path(raw);
        if !is_file_exist(&file_path) {
            return Err(ScreenerError::Io(io::Error::new(
                ErrorKind::NotFound,
                format!("ticker file {} not found", file_path.display()),
            )));
        }
        let file = File::open(&file_path)?;
        let from_file = Ticker::parse_from_file(BufReader::new(file))?;
        info!("Read {} tickers from {}", from_file.len(), file_path.display());
        tickers.extend(from_file);
    }

    Ok(dedup(tickers))
}

fn dedup(tickers: Vec<Ticker>) -> Vec<Ticker> {
    let mut seen = HashSet::new();
    tickers.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
