//! Pure numeric transforms over the entity collections.
//!
//! Every function is total over its domain: division by zero returns 0
//! instead of NaN/Infinity, and nothing here panics.

use serde::{Deserialize, Serialize};

/// Match scores at or above this are a strong fit.
pub const STRONG_MATCH_MIN: u8 = 80;
/// Match scores at or above this (but below strong) are a medium fit.
pub const MEDIUM_MATCH_MIN: u8 = 65;

/// Percentage of `part` over `whole`, rounded to the nearest integer.
///
/// Returns 0 when `whole` is 0. Values above 100 are not clamped; a
/// completed count that exceeds its total shows up as >100%.
pub fn percent_of(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Sum a numeric field over a collection. Empty collections sum to 0.
pub fn sum_by<T>(items: &[T], field: impl Fn(&T) -> f64) -> f64 {
    items.iter().map(field).sum()
}

/// Covers per month needed for revenue to equal fixed costs:
/// `ceil(fixed / (price * margin))`.
pub fn break_even_covers(monthly_fixed: f64, avg_price: f64, gross_margin: f64) -> u32 {
    let contribution = avg_price * gross_margin;
    if contribution <= 0.0 {
        return 0;
    }
    (monthly_fixed / contribution).ceil() as u32
}

/// Second stage of the break-even formula: monthly covers spread over the
/// operating days in a month, rounded up.
pub fn covers_per_day(covers_per_month: u32, operating_days: u32) -> u32 {
    if operating_days == 0 {
        return 0;
    }
    covers_per_month.div_ceil(operating_days)
}

/// Compact currency label: `$999` below one thousand, `$Nk` above, with
/// the thousands value rounded (not truncated) and the sign preserved.
pub fn format_currency(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let abs = n.abs();
    if abs >= 1000.0 {
        format!("{}${}k", sign, (abs / 1000.0).round() as i64)
    } else if abs.fract() == 0.0 {
        format!("{}${}", sign, abs as i64)
    } else {
        format!("{}${}", sign, abs)
    }
}

// ---------------------------------------------------------------------------
// Match tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Strong,
    Medium,
    Weak,
}

/// Bucket a 0-100 match score for display classification.
pub fn match_tier(score: u8) -> MatchTier {
    if score >= STRONG_MATCH_MIN {
        MatchTier::Strong
    } else if score >= MEDIUM_MATCH_MIN {
        MatchTier::Medium
    } else {
        MatchTier::Weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_guards_divide_by_zero() {
        assert_eq!(percent_of(0, 0), 0);
        assert_eq!(percent_of(5, 0), 0);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(percent_of(50, 200), 25);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
    }

    #[test]
    fn percent_does_not_clamp() {
        assert_eq!(percent_of(201, 200), 101);
    }

    #[test]
    fn sum_of_empty_is_zero() {
        let empty: Vec<f64> = vec![];
        assert_eq!(sum_by(&empty, |v| *v), 0.0);
    }

    #[test]
    fn sum_folds_field() {
        let amounts = [1200.0, 50.0, 49.5];
        assert_eq!(sum_by(&amounts, |v| *v), 1299.5);
    }

    #[test]
    fn break_even_monthly_stage() {
        // $29,450 fixed at a $16 bowl with 66% margin.
        assert_eq!(break_even_covers(29_450.0, 16.0, 0.66), 2789);
    }

    #[test]
    fn break_even_daily_stage() {
        assert_eq!(covers_per_day(2789, 26), 108);
    }

    #[test]
    fn break_even_guards_zero_contribution() {
        assert_eq!(break_even_covers(29_450.0, 0.0, 0.66), 0);
        assert_eq!(break_even_covers(29_450.0, 16.0, 0.0), 0);
        assert_eq!(covers_per_day(2789, 0), 0);
    }

    #[test]
    fn currency_below_one_thousand_is_literal() {
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(50.5), "$50.5");
    }

    #[test]
    fn currency_abbreviates_and_rounds() {
        assert_eq!(format_currency(1000.0), "$1k");
        assert_eq!(format_currency(1500.0), "$2k");
        assert_eq!(format_currency(129_000.0), "$129k");
    }

    #[test]
    fn currency_keeps_sign() {
        assert_eq!(format_currency(-9200.0), "-$9k");
        assert_eq!(format_currency(-500.0), "-$500");
    }

    #[test]
    fn match_tier_thresholds() {
        assert_eq!(match_tier(87), MatchTier::Strong);
        assert_eq!(match_tier(80), MatchTier::Strong);
        assert_eq!(match_tier(79), MatchTier::Medium);
        assert_eq!(match_tier(65), MatchTier::Medium);
        assert_eq!(match_tier(64), MatchTier::Weak);
        assert_eq!(match_tier(0), MatchTier::Weak);
    }
}
