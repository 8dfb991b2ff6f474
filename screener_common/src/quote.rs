//! Quote snapshot and daily price history for a single ticker.
//!
//! Data sources routinely leave fields out or report them as `N/A`; every
//! numeric field of [`QuoteDetails`] is therefore optional.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Quote fields the screener looks at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteDetails {
    /// Company name as reported by the data source.
    pub name: Option<String>,
    /// Previous session close.
    pub previous_close: Option<f64>,
    /// Last traded price.
    pub last_trade: Option<f64>,
    /// Today's open.
    pub open: Option<f64>,
    /// Today's absolute change.
    pub change: Option<f64>,
    /// Today's change in percent.
    pub change_percent: Option<f64>,
    /// Earnings per share estimate for the current year.
    pub eps_current_year: Option<f64>,
    /// Earnings per share estimate for next year.
    pub eps_next_year: Option<f64>,
    /// Price / earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Dividend yield in percent.
    pub dividend_yield: Option<f64>,
    /// Distance from the 52-week high in percent (negative below the high).
    pub percent_from_52wk_high: Option<f64>,
    /// Distance from the 52-week low in percent.
    pub percent_from_52wk_low: Option<f64>,
}

impl QuoteDetails {
    /// Company name, or `fallback` when the source did not report one.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }
}

/// Optional value that prints as `N/A` when missing.
#[derive(Debug, Clone, Copy)]
pub struct Field(pub Option<f64>);

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            None => f.write_str("N/A"),
        }
    }
}

/// One trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    pub open: f64,
    pub high: f64,
    pub low: f64,
}

impl DailyPrice {
    /// Intraday range as a fraction of the open, `None` when the open is not positive.
    pub fn range_fraction(&self) -> Option<f64> {
        if self.open > 0.0 && self.open.is_finite() {
            Some((self.high - self.low) / self.open)
        } else {
            None
        }
    }
}

/// Daily prices keyed by trading date, oldest first.
pub type PriceHistory = BTreeMap<NaiveDate, DailyPrice>;
