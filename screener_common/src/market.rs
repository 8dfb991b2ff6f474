//! Source of quote snapshots and daily price history.
use chrono::NaiveDate;

use crate::quote::{PriceHistory, QuoteDetails};
use crate::result::Result;
use crate::tickers::Ticker;

/// A market data provider queried once per ticker.
pub trait MarketData {
    /// Current quote fields for `ticker`.
    fn quote(&self, ticker: &Ticker) -> Result<QuoteDetails>;

    /// Daily prices for `ticker` between `from` and `to`, both inclusive.
    fn history(&self, ticker: &Ticker, from: NaiveDate, to: NaiveDate) -> Result<PriceHistory>;
}
