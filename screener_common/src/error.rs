//! Error types shared between the screener library and the CLI.
//!
//! The `ScreenerError` enum unifies I/O, HTTP, JSON decoding, ticker parsing and
//! roster scraping failures, allowing both crates to propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the client.
#[derive(Error, Debug)]
pub enum ScreenerError {
    /// I/O error originating from the standard library (files, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// A string could not be turned into a `Ticker`.
    #[error("Invalid ticker symbol: {0:?}")]
    InvalidTicker(String),

    /// Error while parsing the ticker file into `Ticker` values.
    #[error("Parse tickers file error: {0}")]
    ParseTickersFile(String),

    /// Failure while decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// HTTP transport failure or a non-success status from a data source.
    #[error("Network error: {0}")]
    Network(String),

    /// The data source answered, but without the data we asked for.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// The roster page could not be scraped into a list of tickers.
    #[error("Roster error: {0}")]
    Roster(String),

    /// Nothing to screen: no symbols on the command line, in the file or in the roster.
    #[error("No tickers to screen")]
    NoTickers,
}

impl ScreenerError {
    /// Shorthand for [`ScreenerError::Network`].
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Shorthand for [`ScreenerError::MissingData`].
    pub fn missing_data(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }

    /// Shorthand for [`ScreenerError::Roster`].
    pub fn roster(msg: impl Into<String>) -> Self {
        Self::Roster(msg.into())
    }
}
