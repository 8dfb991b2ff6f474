//! Graham intrinsic value and the relative intrinsic value ratio.

use clap::ValueEnum;
use strum_macros::{Display, EnumString};

/// Graham's base P/E for a company with no growth.
const NO_GROWTH_PE: f64 = 8.5;
/// Average AAA corporate bond yield when Graham published the formula.
const GRAHAM_BOND_YIELD: f64 = 4.4;

/// How the growth rate `g` of the Graham formula is derived from the EPS estimates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display, EnumString,
)]
#[clap(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GrowthModel {
    /// Use the next-year EPS estimate itself as `g`.
    #[default]
    NextEps,
    /// Use the percent change from current-year to next-year EPS as `g`.
    EpsChange,
}

impl GrowthModel {
    /// Growth rate in percent points.
    pub fn growth_rate(self, eps: f64, next_eps: f64) -> f64 {
        match self {
            GrowthModel::NextEps => next_eps,
            GrowthModel::EpsChange => {
                if eps == 0.0 {
                    0.0
                } else {
                    (next_eps - eps) / eps * 100.0
                }
            }
        }
    }
}

/// Intrinsic value per share: `EPS x (8.5 + 2g) x 4.4 / Y`, rounded to 3 decimals.
///
/// `bond_yield` is the current AAA corporate bond yield in percent. A yield
/// that is not a positive finite number gives `0.0`.
pub fn graham_intrinsic_value(eps: f64, growth_rate: f64, bond_yield: f64) -> f64 {
    if !(bond_yield > 0.0 && bond_yield.is_finite()) {
        return 0.0;
    }
    let numerator = eps * (NO_GROWTH_PE + 2.0 * growth_rate) * GRAHAM_BOND_YIELD;
    round_to(numerator / bond_yield, 3)
}

/// Ratio of intrinsic value to the last trade, rounded to 4 decimals.
///
/// Above 1.0 the stock trades below its estimated value. Returns `0.0` when
/// either input is zero.
pub fn relative_intrinsic_value(intrinsic_value: f64, last_trade: f64) -> f64 {
    if intrinsic_value == 0.0 || last_trade == 0.0 {
        return 0.0;
    }
    round_to(intrinsic_value / last_trade, 4)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_graham_with_zero_growth() {
        // 2.0 * 8.5 * 4.4 / 4.4
        assert!(close(graham_intrinsic_value(2.0, 0.0, 4.4), 17.0));
    }

    #[test]
    fn test_graham_known_value() {
        // 3.0 * (8.5 + 10) * 4.4 / 3.96 = 61.666...
        assert!(close(graham_intrinsic_value(3.0, 5.0, 3.96), 61.667));
    }

    #[test]
    fn test_graham_zero_eps_is_zero() {
        assert!(close(graham_intrinsic_value(0.0, 7.0, 3.96), 0.0));
    }

    #[test]
    fn test_graham_guards_bad_bond_yield() {
        assert_eq!(graham_intrinsic_value(2.0, 5.0, 0.0), 0.0);
        assert_eq!(graham_intrinsic_value(2.0, 5.0, -1.0), 0.0);
        assert_eq!(graham_intrinsic_value(2.0, 5.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_riv_guards_zero_trade_price() {
        assert_eq!(relative_intrinsic_value(50.0, 0.0), 0.0);
        assert_eq!(relative_intrinsic_value(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_riv_rounds_to_four_places() {
        assert!(close(relative_intrinsic_value(100.0, 30.0), 3.3333));
        assert!(close(relative_intrinsic_value(45.0, 50.0), 0.9));
    }

    #[test]
    fn test_growth_models() {
        assert!(close(GrowthModel::NextEps.growth_rate(2.0, 2.5), 2.5));
        assert!(close(GrowthModel::EpsChange.growth_rate(2.0, 2.5), 25.0));
        assert!(close(GrowthModel::EpsChange.growth_rate(0.0, 2.5), 0.0));
    }

    #[test]
    fn test_growth_model_parses_from_cli_text() {
        assert_eq!("eps-change".parse::<GrowthModel>().unwrap(), GrowthModel::EpsChange);
        assert_eq!(GrowthModel::NextEps.to_string(), "next-eps");
    }
}
