//! Command-line arguments for the screener.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use std::time::Duration;

use screener_common::Ticker;
use screener_common::criteria::ScreenConfig;
use screener_common::roster::{DEFAULT_ROSTER_URL, RosterLayout};
use screener_common::valuation::GrowthModel;
use screener_common::volatility::DEFAULT_WINDOW_DAYS;

use crate::yahoo::{DEFAULT_CHART_URL, DEFAULT_QUOTE_URL, YahooConfig};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Ticker symbols to screen, or `500` for every S&P 500 constituent.
    pub tickers: Vec<Ticker>,

    /// Path to a text file with more tickers, one per line.
    #[clap(long)]
    pub path: Option<String>,

    /// Current AAA corporate bond yield, in percent.
    #[clap(long, default_value_t = 3.96)]
    pub bond_yield: f64,

    /// Minimum dividend yield, in percent (inclusive).
    #[clap(long, default_value_t = 1.0)]
    pub min_dividend: f64,

    /// Relative intrinsic value must be above this.
    #[clap(long, default_value_t = 1.0)]
    pub min_riv: f64,

    /// Average daily range must be above this, in percent.
    #[clap(long, default_value_t = 2.0)]
    pub min_volatility: f64,

    /// Maximum P/E ratio (inclusive).
    #[clap(long, default_value_t = 15.0)]
    pub max_pe: f64,

    /// Calendar days of price history for the volatility estimate.
    #[clap(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub history_days: i64,

    /// How the Graham growth rate is derived from the EPS estimates.
    #[clap(long, value_enum, default_value_t = GrowthModel::NextEps)]
    pub growth_model: GrowthModel,

    /// Yahoo Finance quote endpoint.
    #[clap(long, default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// Yahoo Finance chart endpoint; the symbol is appended.
    #[clap(long, default_value = DEFAULT_CHART_URL)]
    pub chart_url: String,

    /// Page holding the S&P 500 roster table.
    #[clap(long, default_value = DEFAULT_ROSTER_URL)]
    pub roster_url: String,

    /// Index of the roster table in the page.
    #[clap(long, default_value_t = 0)]
    pub roster_table: usize,

    /// Roster column holding the symbol; repeat to give fallbacks.
    #[clap(long = "roster-column", default_values_t = [0usize])]
    pub roster_columns: Vec<usize>,

    /// Header rows to skip in the roster table.
    #[clap(long, default_value_t = 1)]
    pub roster_skip_rows: usize,

    /// HTTP request timeout in seconds.
    #[clap(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Args {
    /// True when the positional arguments ask for the S&P 500 roster.
    pub fn wants_roster(&self) -> bool {
        self.tickers
            .first()
            .is_some_and(|t| t.as_str() == screener_common::tickers::SP500_TOKEN)
    }

    pub fn screen_config(&self) -> ScreenConfig {
        ScreenConfig {
            bond_yield: self.bond_yield,
            min_dividend_yield: self.min_dividend,
            min_riv: self.min_riv,
            min_volatility: self.min_volatility,
            max_pe: self.max_pe,
            history_days: self.history_days,
            growth_model: self.growth_model,
        }
    }

    pub fn yahoo_config(&self) -> YahooConfig {
        YahooConfig {
            quote_url: self.quote_url.clone(),
            chart_url: self.chart_url.clone(),
        }
    }

    pub fn roster_layout(&self) -> RosterLayout {
        RosterLayout {
            table_index: self.roster_table,
            symbol_columns: self.roster_columns.clone(),
            skip_rows: self.roster_skip_rows,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
