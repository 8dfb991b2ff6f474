//! Per-ticker screening loop and the text report.
//!
//! For each ticker the screener fetches the quote and a trailing window of daily
//! prices, derives volatility, intrinsic value and RIV, prints a short block to
//! the report writer and records the ticker in the run's buckets. A missing
//! quote skips the ticker; a missing history only zeroes its volatility.
use chrono::{NaiveDate, TimeDelta};
use log::{debug, error, info, warn};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use screener_common::criteria::{Bucket, Buckets, Flags, ScreenConfig};
use screener_common::quote::{Field, QuoteDetails};
use screener_common::valuation::{graham_intrinsic_value, relative_intrinsic_value};
use screener_common::volatility::average_daily_range;
use screener_common::{MarketData, Result, Ticker};

/// Everything computed for one ticker.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub ticker: Ticker,
    pub details: QuoteDetails,
    /// Average daily range in percent, 0 when no history was available.
    pub volatility: f64,
    pub intrinsic_value: f64,
    pub riv: f64,
    pub flags: Flags,
    pub bucket: Option<Bucket>,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct Report {
    pub buckets: Buckets,
    /// Tickers for which no quote could be fetched.
    pub skipped: Vec<Ticker>,
    /// Set when the run was cut short by Ctrl+C.
    pub interrupted: bool,
}

pub struct Screener<M> {
    market: M,
    config: ScreenConfig,
    today: NaiveDate,
}

impl<M: MarketData> Screener<M> {
    /// `today` is the last day of the history window.
    pub fn new(market: M, config: ScreenConfig, today: NaiveDate) -> Self {
        Self { market, config, today }
    }

    /// Volatility over the configured window; any fetch failure counts as 0.
    pub fn volatility(&self, ticker: &Ticker) -> f64 {
        let from = TimeDelta::try_days(self.config.history_days)
            .and_then(|window| self.today.checked_sub_signed(window))
            .unwrap_or(NaiveDate::MIN);

        match self.market.history(ticker, from, self.today) {
            Ok(history) => {
                debug!("{}: {} days of history", ticker, history.len());
                average_daily_range(&history)
            }
            Err(e) => {
                warn!("No price history for {}, volatility set to 0: {}", ticker, e);
                0.0
            }
        }
    }

    /// Fetch and evaluate one ticker. Only a failed quote lookup is an error.
    pub fn evaluate(&self, ticker: &Ticker) -> Result<Evaluation> {
        let details = self.market.quote(ticker)?;
        let volatility = self.volatility(ticker);

        let eps = details.eps_current_year.unwrap_or(0.0);
        let next_eps = details.eps_next_year.unwrap_or(0.0);
        let growth = self.config.growth_model.growth_rate(eps, next_eps);
        let intrinsic_value = graham_intrinsic_value(eps, growth, self.config.bond_yield);
        let riv = relative_intrinsic_value(intrinsic_value, details.last_trade.unwrap_or(0.0));

        let flags = Flags::evaluate(
            &self.config,
            riv,
            volatility,
            details.pe_ratio,
            details.dividend_yield,
        );
        let bucket = flags.bucket();
        if let Some(bucket) = bucket {
            info!("{} is {}", ticker, bucket);
        }

        Ok(Evaluation {
            ticker: ticker.clone(),
            details,
            volatility,
            intrinsic_value,
            riv,
            flags,
            bucket,
        })
    }

    /// Screen `tickers` in order, writing one block per ticker to `out`.
    ///
    /// Stops before the next ticker once `shutdown` is set.
    pub fn run<W: Write>(&self, tickers: &[Ticker], out: &mut W, shutdown: &AtomicBool) -> Result<Report> {
        let mut report = Report::default();

        for (i, ticker) in tickers.iter().enumerate() {
            if shutdown.load(Ordering::Relaxed) {
                warn!("Interrupted after {} of {} tickers", i, tickers.len());
                report.interrupted = true;
                break;
            }

            match self.evaluate(ticker) {
                Ok(evaluation) => {
                    debug!("{} flags: {:?}", ticker, evaluation.flags);
                    write_evaluation(out, &evaluation)?;
                    report.buckets.record(ticker, evaluation.riv, evaluation.bucket);
                }
                Err(e) => {
                    error!("Skipping {}: {}", ticker, e);
                    writeln!(out, "Could not fetch quote for {}: {}", ticker, e)?;
                    report.skipped.push(ticker.clone());
                }
            }
            writeln!(out)?;
        }

        Ok(report)
    }
}

fn signed(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:+.2}", v))
}

/// Print the block for one evaluated ticker.
pub fn write_evaluation<W: Write>(out: &mut W, e: &Evaluation) -> std::io::Result<()> {
    let d = &e.details;

    writeln!(out, "Finding quote for {} ({})", d.display_name(e.ticker.as_str()), e.ticker)?;
    writeln!(
        out,
        "Prev Close: {}, Today Open: ${}, Last Trade: ${}",
        Field(d.previous_close),
        Field(d.open),
        Field(d.last_trade)
    )?;
    match d.change_percent {
        Some(pct) => writeln!(out, "Today's Change: {} ({:+.2}%)", signed(d.change), pct)?,
        None => writeln!(out, "Today's Change: {}", signed(d.change))?,
    }
    writeln!(
        out,
        "% from 52wk Low: {:.2}, % from 52wk High: {:.2}",
        Field(d.percent_from_52wk_low),
        Field(d.percent_from_52wk_high)
    )?;
    writeln!(out, "Volatility: {:.2}%", e.volatility)?;

    if e.intrinsic_value != 0.0 {
        writeln!(out, "Intrinsic value: ${:.3}", e.intrinsic_value)?;
        writeln!(out, "RIV: {:.4}", e.riv)?;
    }

    match d.pe_ratio {
        Some(pe) => writeln!(out, "P/E ratio: {:.2}", pe)?,
        None => writeln!(out, "P/E ratio: Check Research")?,
    }
    match d.dividend_yield {
        Some(dy) => writeln!(out, "Dividend yield: {:.2}%", dy)?,
        None => writeln!(out, "Dividend yield: {}", Field(None))?,
    }

    match e.bucket {
        Some(Bucket::Hopeful) => writeln!(out, "***** Check out: {} *****", e.ticker)?,
        Some(Bucket::HopefulMindPe) => {
            let pe = d.pe_ratio.map_or_else(|| "Check Research".to_string(), |pe| format!("{:.2}", pe));
            writeln!(out, "***** Check out: {}, mind the PE ({}) *****", e.ticker, pe)?
        }
        Some(Bucket::IgnoreDividend) | None => {}
    }
    Ok(())
}

fn list(tickers: &[Ticker]) -> String {
    let symbols: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
    format!("[{}]", symbols.join(", "))
}

/// Print the closing summary of all buckets.
pub fn write_summary<W: Write>(out: &mut W, report: &Report) -> std::io::Result<()> {
    let b = &report.buckets;
    if report.interrupted {
        writeln!(out, "(interrupted, partial results)")?;
    }
    writeln!(out, "The hopefuls are: {}", list(&b.hopefuls))?;
    writeln!(out, "Hopeful, but mind the pe are: {}", list(&b.hopefuls_mind_pe))?;
    writeln!(out, "The undervalued stocks are: {}", list(&b.undervalued))?;
    writeln!(out, "Ignoring dividends, these warrant a look: {}", list(&b.ignore_dividend))?;
    if !report.skipped.is_empty() {
        writeln!(out, "Skipped, no quote data: {}", list(&report.skipped))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use screener_common::ScreenerError;
    use screener_common::quote::{DailyPrice, PriceHistory};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory market with canned quotes; history is the same two days for every ticker.
    #[derive(Default)]
    struct FakeMarket {
        quotes: HashMap<String, QuoteDetails>,
        history_fails: bool,
        history_calls: RefCell<Vec<(NaiveDate, NaiveDate)>>,
    }

    impl FakeMarket {
        fn with_quote(mut self, symbol: &str, details: QuoteDetails) -> Self {
            self.quotes.insert(symbol.to_string(), details);
            self
        }
    }

    impl MarketData for FakeMarket {
        fn quote(&self, ticker: &Ticker) -> Result<QuoteDetails> {
            self.quotes
                .get(ticker.as_str())
                .cloned()
                .ok_or_else(|| ScreenerError::network("HTTP 404"))
        }

        fn history(&self, _ticker: &Ticker, from: NaiveDate, to: NaiveDate) -> Result<PriceHistory> {
            self.history_calls.borrow_mut().push((from, to));
            if self.history_fails {
                return Err(ScreenerError::network("timed out"));
            }
            let mut history = PriceHistory::new();
            // 3 % average range
            history.insert(date(4), DailyPrice { open: 100.0, high: 103.0, low: 100.0 });
            history.insert(date(5), DailyPrice { open: 100.0, high: 102.0, low: 99.0 });
            Ok(history)
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn ticker(s: &str) -> Ticker {
        s.parse().unwrap()
    }

    /// EPS 2 / next 2 at 3.96 % gives IV = 2 * 12.5 * 4.4 / 3.96 = 27.778.
    fn cheap_dividend_stock(pe: Option<f64>) -> QuoteDetails {
        QuoteDetails {
            name: Some("Cheap Co".into()),
            previous_close: Some(19.5),
            last_trade: Some(20.0),
            open: Some(19.6),
            change: Some(0.5),
            change_percent: Some(2.56),
            eps_current_year: Some(2.0),
            eps_next_year: Some(2.0),
            pe_ratio: pe,
            dividend_yield: Some(2.5),
            percent_from_52wk_high: Some(-10.0),
            percent_from_52wk_low: Some(25.0),
        }
    }

    fn screener(market: FakeMarket) -> Screener<FakeMarket> {
        Screener::new(market, ScreenConfig::default(), date(10))
    }

    #[test]
    fn test_evaluate_computes_all_measures() {
        let s = screener(FakeMarket::default().with_quote("CHP", cheap_dividend_stock(Some(10.0))));
        let e = s.evaluate(&ticker("CHP")).unwrap();

        assert!((e.volatility - 3.0).abs() < 1e-9);
        assert!((e.intrinsic_value - 27.778).abs() < 1e-9);
        assert!((e.riv - 1.3889).abs() < 1e-9);
        assert_eq!(e.bucket, Some(Bucket::Hopeful));
    }

    #[test]
    fn test_history_window_ends_today() {
        let s = screener(FakeMarket::default().with_quote("CHP", cheap_dividend_stock(None)));
        s.evaluate(&ticker("CHP")).unwrap();

        let calls = s.market.history_calls.borrow();
        assert_eq!(calls.as_slice(), &[(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(), date(10))]);
    }

    #[test]
    fn test_history_failure_means_zero_volatility() {
        let market = FakeMarket {
            history_fails: true,
            ..FakeMarket::default().with_quote("CHP", cheap_dividend_stock(Some(10.0)))
        };
        let e = screener(market).evaluate(&ticker("CHP")).unwrap();

        assert_eq!(e.volatility, 0.0);
        assert!(!e.flags.volatility);
        assert_eq!(e.bucket, None);
    }

    #[test]
    fn test_missing_eps_and_zero_price_are_guarded() {
        let details = QuoteDetails {
            last_trade: Some(0.0),
            eps_current_year: None,
            ..cheap_dividend_stock(Some(10.0))
        };
        let e = screener(FakeMarket::default().with_quote("ZZZ", details))
            .evaluate(&ticker("ZZZ"))
            .unwrap();
        assert_eq!(e.intrinsic_value, 0.0);
        assert_eq!(e.riv, 0.0);

        let details = QuoteDetails { last_trade: None, ..cheap_dividend_stock(Some(10.0)) };
        let e = screener(FakeMarket::default().with_quote("ZZZ", details))
            .evaluate(&ticker("ZZZ"))
            .unwrap();
        assert!(e.intrinsic_value > 0.0);
        assert_eq!(e.riv, 0.0);
    }

    #[test]
    fn test_run_fills_buckets_and_skips_failures() {
        let market = FakeMarket::default()
            .with_quote("AAA", cheap_dividend_stock(Some(10.0)))
            .with_quote("BBB", cheap_dividend_stock(Some(30.0)))
            .with_quote("CCC", QuoteDetails { dividend_yield: None, ..cheap_dividend_stock(None) });
        let tickers = vec![ticker("AAA"), ticker("BBB"), ticker("NOPE"), ticker("CCC")];

        let mut out = Vec::new();
        let report = screener(market).run(&tickers, &mut out, &AtomicBool::new(false)).unwrap();

        assert_eq!(report.buckets.hopefuls, vec![ticker("AAA")]);
        assert_eq!(report.buckets.hopefuls_mind_pe, vec![ticker("BBB")]);
        assert_eq!(report.buckets.ignore_dividend, vec![ticker("CCC")]);
        assert_eq!(report.buckets.undervalued, vec![ticker("AAA"), ticker("BBB"), ticker("CCC")]);
        assert_eq!(report.skipped, vec![ticker("NOPE")]);
        assert!(!report.interrupted);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Finding quote for Cheap Co (AAA)"));
        assert!(text.contains("***** Check out: AAA *****"));
        assert!(text.contains("***** Check out: BBB, mind the PE (30.00) *****"));
        assert!(text.contains("Could not fetch quote for NOPE"));
        assert!(text.contains("P/E ratio: Check Research"));
        assert!(text.contains("Dividend yield: N/A"));
    }

    #[test]
    fn test_run_stops_when_shutdown_is_set() {
        let market = FakeMarket::default().with_quote("AAA", cheap_dividend_stock(Some(10.0)));
        let mut out = Vec::new();
        let report = screener(market)
            .run(&[ticker("AAA")], &mut out, &AtomicBool::new(true))
            .unwrap();

        assert!(report.interrupted);
        assert!(report.buckets.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_evaluation_prints_na_fields() {
        let e = Evaluation {
            ticker: ticker("XYZ"),
            details: QuoteDetails::default(),
            volatility: 0.0,
            intrinsic_value: 0.0,
            riv: 0.0,
            flags: Flags::default(),
            bucket: None,
        };
        let mut out = Vec::new();
        write_evaluation(&mut out, &e).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Finding quote for XYZ (XYZ)\n"));
        assert!(text.contains("Prev Close: N/A, Today Open: $N/A, Last Trade: $N/A"));
        assert!(text.contains("Today's Change: N/A\n"));
        assert!(!text.contains("RIV:"));
    }

    #[test]
    fn test_write_summary_lists_buckets() {
        let mut report = Report::default();
        report.buckets.record(&ticker("KO"), 1.5, Some(Bucket::Hopeful));
        report.skipped.push(ticker("BAD"));

        let mut out = Vec::new();
        write_summary(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "The hopefuls are: [KO]\n\
             Hopeful, but mind the pe are: []\n\
             The undervalued stocks are: [KO]\n\
             Ignoring dividends, these warrant a look: []\n\
             Skipped, no quote data: [BAD]\n"
        );
    }
}
