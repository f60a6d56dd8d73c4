//! Display helpers for rupee and dollar amounts.
//!
//! These are presentation transforms layered on top of a [`TaxResult`](crate::TaxResult);
//! the tax engine never calls them. Grouping, sign and symbol placement are
//! rendered by `rusty_money`.

use std::fmt;
use std::iter;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Formatter, Money, Params, Position, iso};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed conversion rate used by [`convert_currency`].
pub const USD_TO_INR: Decimal = Decimal::from_parts(83, 0, 0, false, 0);

const ONE_LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const ONE_CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Currencies the dashboard can display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Inr => "₹",
            Self::Usd => "$",
        }
    }

    /// The ISO 4217 definition used for formatting.
    pub fn iso(&self) -> &'static iso::Currency {
        match self {
            Self::Inr => iso::INR,
            Self::Usd => iso::USD,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a currency code is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported currency '{0}' (expected INR or USD)")]
pub struct ParseCurrencyError(pub String);

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::Inr),
            "USD" => Ok(Self::Usd),
            _ => Err(ParseCurrencyError(s.to_string())),
        }
    }
}

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes amount input: trims whitespace, drops a leading currency
/// symbol and removes comma separators.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unsigned = trimmed
        .strip_prefix('₹')
        .or_else(|| trimmed.strip_prefix('$'))
        .unwrap_or(trimmed);
    unsigned.trim().replace(',', "")
}

/// Parses a user-entered amount such as `"₹12,00,000"` or `"1,234.56"`.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Digit grouping from the right: three digits, then pairs for rupees
/// (`12,34,567`) or threes for dollars (`1,234,567`).
///
/// `rusty_money`'s locale patterns stop after three separators, so the full
/// pattern is spelled out to cover every `Decimal` magnitude.
fn separator_pattern(currency: Currency) -> Vec<usize> {
    let rest = match currency {
        Currency::Inr => 2,
        Currency::Usd => 3,
    };
    iter::once(3).chain(iter::repeat_n(rest, 13)).collect()
}

/// Renders an already-rounded amount through `rusty_money`, keeping the
/// fractional digits exactly as they appear in the decimal.
fn format_money(
    amount: Decimal,
    currency: Currency,
    symbol: Option<&'static str>,
) -> String {
    // Negative zero would otherwise print its sign.
    let amount = if amount.is_zero() { Decimal::ZERO } else { amount };
    let money = Money::from_decimal(amount, currency.iso());
    let params = Params {
        separator_pattern: separator_pattern(currency),
        positions: vec![Position::Sign, Position::Symbol, Position::Amount],
        rounding: None,
        symbol,
        ..Default::default()
    };
    Formatter::money(&money, params)
}

/// Formats `amount` in whole units with the currency symbol.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::currency::{Currency, format_currency};
///
/// assert_eq!(format_currency(dec!(1125768), Currency::Inr), "₹11,25,768");
/// assert_eq!(format_currency(dec!(1125768), Currency::Usd), "$1,125,768");
/// assert_eq!(format_currency(dec!(1931.5), Currency::Inr), "₹1,932");
/// ```
pub fn format_currency(
    amount: Decimal,
    currency: Currency,
) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format_money(rounded, currency, Some(currency.symbol()))
}

/// Formats a plain number with Indian grouping and at most three fraction digits.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::currency::format_number;
///
/// assert_eq!(format_number(dec!(1234567.8912)), "12,34,567.891");
/// ```
pub fn format_number(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    format_money(rounded.normalize(), Currency::Inr, None)
}

/// Formats an amount with a lakh/crore magnitude label for rupees.
///
/// Amounts of at least one crore are shown as `₹x.yCr`, at least one lakh as
/// `₹x.yL`; smaller amounts and all dollar amounts use [`format_currency`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::currency::{Currency, format_compact};
///
/// assert_eq!(format_compact(dec!(1200000), Currency::Inr), "₹12.0L");
/// assert_eq!(format_compact(dec!(25000000), Currency::Inr), "₹2.5Cr");
/// assert_eq!(format_compact(dec!(99999), Currency::Inr), "₹99,999");
/// ```
pub fn format_compact(
    amount: Decimal,
    currency: Currency,
) -> String {
    if currency != Currency::Inr {
        return format_currency(amount, currency);
    }

    let (scaled, suffix) = if amount >= ONE_CRORE {
        (amount / ONE_CRORE, "Cr")
    } else if amount >= ONE_LAKH {
        (amount / ONE_LAKH, "L")
    } else {
        return format_currency(amount, currency);
    };

    let mut tenths = scaled.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    tenths.rescale(1);
    format!("{}{tenths}{suffix}", currency.symbol())
}

/// Converts between rupees and dollars at the fixed [`USD_TO_INR`] rate.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::currency::{Currency, convert_currency};
///
/// assert_eq!(convert_currency(dec!(100), Currency::Usd, Currency::Inr), dec!(8300));
/// assert_eq!(convert_currency(dec!(8300), Currency::Inr, Currency::Usd), dec!(100));
/// ```
pub fn convert_currency(
    amount: Decimal,
    from: Currency,
    to: Currency,
) -> Decimal {
    match (from, to) {
        (Currency::Usd, Currency::Inr) => amount * USD_TO_INR,
        (Currency::Inr, Currency::Usd) => amount / USD_TO_INR,
        _ => amount,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // Grouping
    // =========================================================================

    #[test]
    fn separator_pattern_starts_with_thousands() {
        assert_eq!(separator_pattern(Currency::Inr)[..3], [3, 2, 2]);
        assert_eq!(separator_pattern(Currency::Usd)[..3], [3, 3, 3]);
    }

    #[test]
    fn format_currency_short_numbers_ungrouped() {
        assert_eq!(format_currency(Decimal::ZERO, Currency::Inr), "₹0");
        assert_eq!(format_currency(dec!(999), Currency::Usd), "$999");
    }

    #[test]
    fn format_currency_indian_grouping() {
        assert_eq!(format_currency(dec!(1000), Currency::Inr), "₹1,000");
        assert_eq!(format_currency(dec!(100000), Currency::Inr), "₹1,00,000");
        assert_eq!(format_currency(dec!(12345678), Currency::Inr), "₹1,23,45,678");
    }

    #[test]
    fn format_currency_indian_grouping_beyond_crores() {
        assert_eq!(
            format_currency(dec!(12345678901), Currency::Inr),
            "₹12,34,56,78,901"
        );
    }

    #[test]
    fn format_currency_western_grouping() {
        assert_eq!(format_currency(dec!(1000), Currency::Usd), "$1,000");
        assert_eq!(format_currency(dec!(12345678), Currency::Usd), "$12,345,678");
        assert_eq!(
            format_currency(dec!(1234567890123), Currency::Usd),
            "$1,234,567,890,123"
        );
    }

    // =========================================================================
    // format_currency
    // =========================================================================

    #[test]
    fn format_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(0.5), Currency::Inr), "₹1");
        assert_eq!(format_currency(dec!(0.49), Currency::Inr), "₹0");
        assert_eq!(format_currency(dec!(-2.5), Currency::Usd), "-$3");
    }

    #[test]
    fn format_currency_negative_rupees() {
        assert_eq!(format_currency(dec!(-150000), Currency::Inr), "-₹1,50,000");
    }

    #[test]
    fn format_currency_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(-0.2), Currency::Inr), "₹0");
    }

    // =========================================================================
    // format_number
    // =========================================================================

    #[test]
    fn format_number_trims_trailing_zeros() {
        assert_eq!(format_number(dec!(1500.500)), "1,500.5");
        assert_eq!(format_number(dec!(250000.00)), "2,50,000");
    }

    #[test]
    fn format_number_negative() {
        assert_eq!(format_number(dec!(-1234.5)), "-1,234.5");
    }

    // =========================================================================
    // format_compact
    // =========================================================================

    #[test]
    fn format_compact_lakh_threshold() {
        assert_eq!(format_compact(dec!(100000), Currency::Inr), "₹1.0L");
        assert_eq!(format_compact(dec!(1125768), Currency::Inr), "₹11.3L");
    }

    #[test]
    fn format_compact_rounds_midpoint_to_even() {
        assert_eq!(format_compact(dec!(225000), Currency::Inr), "₹2.2L");
        assert_eq!(format_compact(dec!(235000), Currency::Inr), "₹2.4L");
    }

    #[test]
    fn format_compact_crore_threshold() {
        assert_eq!(format_compact(dec!(10000000), Currency::Inr), "₹1.0Cr");
    }

    #[test]
    fn format_compact_usd_is_full_format() {
        assert_eq!(format_compact(dec!(1200000), Currency::Usd), "$1,200,000");
    }

    // =========================================================================
    // Conversion and parsing
    // =========================================================================

    #[test]
    fn convert_same_currency_is_identity() {
        assert_eq!(convert_currency(dec!(42), Currency::Inr, Currency::Inr), dec!(42));
        assert_eq!(convert_currency(dec!(42), Currency::Usd, Currency::Usd), dec!(42));
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("inr".parse::<Currency>(), Ok(Currency::Inr));
        assert_eq!(" USD ".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!(
            "EUR".parse::<Currency>(),
            Err(ParseCurrencyError("EUR".to_string()))
        );
    }

    #[test]
    fn parse_amount_strips_symbol_and_separators() {
        assert_eq!(parse_amount("₹12,00,000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("  987  ").unwrap(), dec!(987));
    }

    #[test]
    fn parse_amount_empty_is_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("  ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(parse_amount("twelve lakh").is_err());
    }
}
