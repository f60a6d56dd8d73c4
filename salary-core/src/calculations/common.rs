//! Common decimal helpers shared by the engine and the presentation layer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, which is how paise
/// amounts are rounded on a payslip.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1932.004)), dec!(1932.00));
/// assert_eq!(round_half_up(dec!(1932.005)), dec!(1932.01));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-10), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Returns the smallest strictly positive value, or zero if there is none.
///
/// Zero and negative candidates are skipped rather than clamped, so a
/// negative candidate can never pull the result below the positive ones.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::min_positive;
///
/// assert_eq!(min_positive(&[dec!(240000), dec!(-5), dec!(300000)]), dec!(240000));
/// assert_eq!(min_positive(&[dec!(-1), dec!(0)]), dec!(0));
/// ```
pub fn min_positive(candidates: &[Decimal]) -> Decimal {
    candidates
        .iter()
        .copied()
        .filter(|value| *value > Decimal::ZERO)
        .min()
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(0.0749)), dec!(0.07));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(0.075)), dec!(0.08));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-2.345)), dec!(-2.35));
    }

    #[test]
    fn round_half_up_preserves_whole_rupees() {
        assert_eq!(round_half_up(dec!(1125768)), dec!(1125768.00));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(50000), dec!(30000)), dec!(50000));
        assert_eq!(max(dec!(30000), dec!(50000)), dec!(50000));
    }

    #[test]
    fn min_returns_smaller_value() {
        assert_eq!(min(dec!(2400), dec!(6000)), dec!(2400));
        assert_eq!(min(dec!(6000), dec!(2400)), dec!(2400));
    }

    #[test]
    fn min_handles_equal_values() {
        assert_eq!(min(dec!(1800), dec!(1800)), dec!(1800));
    }

    // =========================================================================
    // min_positive tests
    // =========================================================================

    #[test]
    fn min_positive_picks_smallest_positive() {
        let result = min_positive(&[dec!(240000), dec!(228000), dec!(300000)]);

        assert_eq!(result, dec!(228000));
    }

    #[test]
    fn min_positive_skips_negative_candidates() {
        let result = min_positive(&[dec!(12), dec!(-499985.6), dec!(2500000)]);

        assert_eq!(result, dec!(12));
    }

    #[test]
    fn min_positive_skips_zero_candidates() {
        let result = min_positive(&[dec!(0), dec!(14.4), dec!(12)]);

        assert_eq!(result, dec!(12));
    }

    #[test]
    fn min_positive_without_eligible_candidates_is_zero() {
        assert_eq!(min_positive(&[dec!(0), dec!(-1), dec!(-0.01)]), Decimal::ZERO);
        assert_eq!(min_positive(&[]), Decimal::ZERO);
    }
}
