//! Volatility as the average daily high-low spread relative to the open.

use crate::quote::PriceHistory;
use crate::valuation::round_to;

/// Default trailing window, in calendar days.
pub const DEFAULT_WINDOW_DAYS: i64 = 70;

/// Mean of `(high - low) / open` over `history`, in percent.
///
/// The mean fraction is rounded to 4 decimals before scaling to percent. Days
/// with a non-positive open are ignored; an empty (or fully ignored) history
/// gives `0.0`.
pub fn average_daily_range(history: &PriceHistory) -> f64 {
    let ranges: Vec<f64> = history.values().filter_map(|day| day.range_fraction()).collect();
    if ranges.is_empty() {
        return 0.0;
    }
    let mean = ranges.iter().sum::<f64>() / ranges.len() as f64;
    round_to(mean, 4) * 100.0
}
