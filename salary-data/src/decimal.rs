//! Serde helpers reading `Decimal` CSV cells from their text.
//!
//! The `csv` deserializer infers a type for each cell, so `Decimal`'s own
//! `Deserialize` would receive fractional amounts as `f64` and drop digits
//! beyond 15 or so. Parsing the raw text keeps every digit.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

/// Deserializes a required decimal cell.
pub(crate) fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(de::Error::custom)
}

/// Deserializes an optional decimal cell. An empty cell is `None`.
pub(crate) fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(de::Error::custom),
        None => Ok(None),
    }
}
