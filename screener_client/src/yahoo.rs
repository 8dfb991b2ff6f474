//! Yahoo Finance data source.
//!
//! Quotes come from the v7 `quote` endpoint and daily prices from the v8
//! `chart` endpoint. Both answer JSON; the mapping into screener types lives in
//! [`parse_quote_response`] and [`parse_chart_response`] so it can be tested
//! without network access.
//!
//! Note: Yahoo Finance data is delayed and intended for personal use.

use chrono::{DateTime, Days, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;

use screener_common::quote::{DailyPrice, PriceHistory, QuoteDetails};
use screener_common::{MarketData, Result, ScreenerError, Ticker};

use crate::http;

pub const DEFAULT_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Endpoints used by [`YahooClient`].
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub quote_url: String,
    /// Base URL; the symbol is appended as a path segment.
    pub chart_url: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            chart_url: DEFAULT_CHART_URL.to_string(),
        }
    }
}

/// Yahoo Finance API client
pub struct YahooClient {
    client: Client,
    config: YahooConfig,
}

impl YahooClient {
    pub fn new(client: Client, config: YahooConfig) -> Self {
        Self { client, config }
    }
}

impl MarketData for YahooClient {
    fn quote(&self, ticker: &Ticker) -> Result<QuoteDetails> {
        let body = http::get_text(
            &self.client,
            &self.config.quote_url,
            &[("symbols", ticker.yahoo_symbol())],
        )?;
        parse_quote_response(&body)
    }

    fn history(&self, ticker: &Ticker, from: NaiveDate, to: NaiveDate) -> Result<PriceHistory> {
        let url = format!(
            "{}/{}",
            self.config.chart_url.trim_end_matches('/'),
            ticker.yahoo_symbol()
        );
        let (period1, period2) = chart_period(from, to);
        let body = http::get_text(
            &self.client,
            &url,
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
            ],
        )?;
        parse_chart_response(&body)
    }
}

/// Unix timestamps covering `from..=to` as whole UTC days.
fn chart_period(from: NaiveDate, to: NaiveDate) -> (i64, i64) {
    let start = from.and_time(Default::default()).and_utc().timestamp();
    let end_day = to.checked_add_days(Days::new(1)).unwrap_or(to);
    let end = end_day.and_time(Default::default()).and_utc().timestamp();
    (start, end)
}

/// Map a v7 quote response to [`QuoteDetails`].
pub fn parse_quote_response(body: &str) -> Result<QuoteDetails> {
    let response: YahooQuoteResponse = serde_json::from_str(body)?;

    if let Some(error) = response.quote_response.error {
        return Err(ScreenerError::missing_data(error.to_string()));
    }

    let data = response
        .quote_response
        .result
        .into_iter()
        .next()
        .ok_or_else(|| ScreenerError::missing_data("No quote data returned"))?;

    let dividend_yield = data
        .trailing_annual_dividend_yield
        .map(|y| y * 100.0)
        .or(data.dividend_yield);

    Ok(QuoteDetails {
        name: data.long_name.or(data.short_name),
        previous_close: data.regular_market_previous_close,
        last_trade: data.regular_market_price,
        open: data.regular_market_open,
        change: data.regular_market_change,
        change_percent: data.regular_market_change_percent,
        eps_current_year: data.eps_current_year,
        eps_next_year: data.eps_forward,
        pe_ratio: data.trailing_pe,
        dividend_yield,
        percent_from_52wk_high: data.fifty_two_week_high_change_percent.map(|p| p * 100.0),
        percent_from_52wk_low: data.fifty_two_week_low_change_percent.map(|p| p * 100.0),
    })
}

/// Map a v8 chart response to daily prices. Days with a missing open, high or low are dropped.
pub fn parse_chart_response(body: &str) -> Result<PriceHistory> {
    let response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(ScreenerError::missing_data(error.to_string()));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ScreenerError::missing_data("No chart data returned"))?;

    let mut history = PriceHistory::new();
    let Some(prices) = result.indicators.quote.into_iter().next() else {
        return Ok(history);
    };

    for (i, &ts) in result.timestamp.iter().enumerate() {
        let at = |v: &Vec<Option<f64>>| v.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low)) = (at(&prices.open), at(&prices.high), at(&prices.low))
        else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        history.insert(date, DailyPrice { open, high, low });
    }

    Ok(history)
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    #[serde(default)]
    result: Vec<YahooQuoteData>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuoteData {
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_previous_close: Option<f64>,
    regular_market_price: Option<f64>,
    regular_market_open: Option<f64>,
    regular_market_change: Option<f64>,
    regular_market_change_percent: Option<f64>,
    eps_current_year: Option<f64>,
    eps_forward: Option<f64>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<f64>,
    trailing_annual_dividend_yield: Option<f64>,
    dividend_yield: Option<f64>,
    fifty_two_week_high_change_percent: Option<f64>,
    fifty_two_week_low_change_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooOhlc>,
}

#[derive(Debug, Deserialize)]
struct YahooOhlc {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
}
