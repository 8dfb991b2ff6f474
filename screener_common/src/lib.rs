//!
//! Types and formulas shared by the stock screener client.
//!
//! This crate aggregates:
//! - `error`: unified error type `ScreenerError` used across the workspace.
//! - `result`: handy `Result<T, ScreenerError>` alias.
//! - `tickers`: ticker symbols and parsing helpers.
//! - `quote`: quote snapshot and daily price history.
//! - `market`: the `MarketData` provider trait.
//! - `valuation`: Graham intrinsic value and RIV.
//! - `volatility`: average daily high-low spread.
//! - `criteria`: thresholds, flags and report buckets.
//! - `roster`: scraping ticker symbols out of an HTML table.
#![warn(missing_docs)]
pub mod criteria;
pub mod error;
pub mod market;
#[allow(missing_docs)]
pub mod quote;
pub mod result;
pub mod roster;
pub mod tickers;
pub mod valuation;
pub mod volatility;

pub use error::ScreenerError;
pub use market::MarketData;
pub use result::Result;
pub use tickers::Ticker;
