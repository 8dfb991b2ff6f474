//! Ticker symbols and helpers for parsing them from the CLI and from files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::ScreenerError;

/// Command-line token that stands for "every S&P 500 constituent".
pub const SP500_TOKEN: &str = "500";

/// Longest symbol we accept; real listings stay well below this.
const MAX_SYMBOL_LEN: usize = 12;

/// Trait providing file parsing for tickers.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Each non-empty line is parsed as a single `Ticker` value using `FromStr`.
    /// Returns an error if any line cannot be parsed.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, ScreenerError>;
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, ScreenerError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(ScreenerError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            match trimmed_line.parse::<Self>() {
                Ok(ticker) => tickers.push(ticker),
                Err(e) => return Err(ScreenerError::ParseTickersFile(e.to_string())),
            }
        }
        Ok(tickers)
    }
}

/// An exchange ticker symbol, normalised to upper case (e.g. `AAPL`, `BRK.B`).
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// The symbol as listed (`BRK.B`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The symbol in Yahoo Finance form, where share classes use a dash (`BRK-B`).
    pub fn yahoo_symbol(&self) -> String {
        self.0.replace('.', "-")
    }
}

impl FromStr for Ticker {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim().trim_matches('"').to_ascii_uppercase();
        let valid_chars = symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));

        if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN || !valid_chars {
            return Err(ScreenerError::InvalidTicker(s.to_string()));
        }
        Ok(Ticker(symbol))
    }
}

impl TryFrom<String> for Ticker {
    type Error = ScreenerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
