//! Screening thresholds and classification of a ticker into report buckets.
//!
//! A ticker lands in at most one *priority* bucket (`Hopeful`, `HopefulMindPe`,
//! `IgnoreDividend`); the undervalued list is tracked separately and may overlap.
use strum_macros::Display;

use crate::tickers::Ticker;
use crate::valuation::GrowthModel;
use crate::volatility::DEFAULT_WINDOW_DAYS;

/// RIV above which a ticker is listed as undervalued, regardless of `min_riv`.
pub const UNDERVALUED_RIV: f64 = 1.0;

/// Thresholds and formula inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    /// Current AAA corporate bond yield, in percent.
    pub bond_yield: f64,
    /// Dividend yield must be at least this, in percent.
    pub min_dividend_yield: f64,
    /// RIV must be strictly above this.
    pub min_riv: f64,
    /// Volatility must be strictly above this, in percent.
    pub min_volatility: f64,
    /// P/E must be at most this.
    pub max_pe: f64,
    /// Trailing window for the volatility estimate, in calendar days.
    pub history_days: i64,
    /// How the Graham growth rate is derived.
    pub growth_model: GrowthModel,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            bond_yield: 3.96,
            min_dividend_yield: 1.0,
            min_riv: 1.0,
            min_volatility: 2.0,
            max_pe: 15.0,
            history_days: DEFAULT_WINDOW_DAYS,
            growth_model: GrowthModel::NextEps,
        }
    }
}

/// Which individual criteria a ticker passed.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub dividend: bool,
    pub riv: bool,
    pub volatility: bool,
    pub pe: bool,
}

impl Flags {
    /// Evaluate the thresholds. Unknown P/E or dividend yield never passes.
    pub fn evaluate(
        config: &ScreenConfig,
        riv: f64,
        volatility: f64,
        pe: Option<f64>,
        dividend_yield: Option<f64>,
    ) -> Self {
        Flags {
            dividend: dividend_yield.is_some_and(|d| d >= config.min_dividend_yield),
            riv: riv > config.min_riv,
            volatility: volatility > config.min_volatility,
            pe: pe.is_some_and(|pe| pe <= config.max_pe),
        }
    }

    /// Priority bucket for these flags, first match wins.
    pub fn bucket(&self) -> Option<Bucket> {
        match (self.dividend, self.riv, self.volatility, self.pe) {
            (true, true, true, true) => Some(Bucket::Hopeful),
            (true, true, true, false) => Some(Bucket::HopefulMindPe),
            (_, true, true, _) => Some(Bucket::IgnoreDividend),
            _ => None,
        }
    }
}

/// Priority buckets of the final report.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Bucket {
    #[strum(serialize = "hopeful")]
    Hopeful,
    #[strum(serialize = "hopeful, mind the P/E")]
    HopefulMindPe,
    #[strum(serialize = "worth a look ignoring dividends")]
    IgnoreDividend,
}

/// Tickers collected over a run, in processing order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    pub hopefuls: Vec<Ticker>,
    pub hopefuls_mind_pe: Vec<Ticker>,
    pub undervalued: Vec<Ticker>,
    pub ignore_dividend: Vec<Ticker>,
}

impl Buckets {
    /// Record one evaluated ticker.
    pub fn record(&mut self, ticker: &Ticker, riv: f64, bucket: Option<Bucket>) {
        if riv > UNDERVALUED_RIV {
            self.undervalued.push(ticker.clone());
        }
        match bucket {
            Some(Bucket::Hopeful) => self.hopefuls.push(ticker.clone()),
            Some(Bucket::HopefulMindPe) => self.hopefuls_mind_pe.push(ticker.clone()),
            Some(Bucket::IgnoreDividend) => self.ignore_dividend.push(ticker.clone()),
            None => {}
        }
    }

    /// True when no ticker was recorded in any list.
    pub fn is_empty(&self) -> bool {
        self.hopefuls.is_empty()
            && self.hopefuls_mind_pe.is_empty()
            && self.undervalued.is_empty()
            && self.ignore_dividend.is_empty()
    }
}
