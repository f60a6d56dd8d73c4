use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Oldest age accepted by [`TaxInput::validate`].
pub const MAX_AGE: u32 = 120;

/// Age used when the caller does not supply one.
pub const DEFAULT_AGE: u32 = 30;

/// Largest gross or monthly HRA accepted by [`TaxInput::validate`] (10^15 rupees).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Errors raised when a [`TaxInput`] fails boundary validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxInputError {
    /// Annual gross income must be non-negative.
    #[error("annual gross income must be non-negative, got {0}")]
    NegativeGross(Decimal),

    /// Monthly HRA must be non-negative, whether or not HRA is elected.
    #[error("monthly HRA must be non-negative, got {0}")]
    NegativeMonthlyHra(Decimal),

    /// Amounts above [`MAX_AMOUNT`] are rejected.
    #[error("{field} must not exceed {MAX_AMOUNT}, got {value}")]
    AmountTooLarge { field: &'static str, value: Decimal },

    /// Age must fall in `0..=MAX_AGE`.
    #[error("age must be between 0 and {MAX_AGE}, got {0}")]
    AgeOutOfRange(u32),
}

/// City classification used for the HRA exemption ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityType {
    #[default]
    Metro,
    NonMetro,
}

impl CityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metro => "metro",
            Self::NonMetro => "non-metro",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metro" => Some(Self::Metro),
            "non-metro" | "non_metro" | "nonmetro" => Some(Self::NonMetro),
            _ => None,
        }
    }
}

impl fmt::Display for CityType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognised [`CityType`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised city type '{0}' (expected 'metro' or 'non-metro')")]
pub struct ParseCityTypeError(pub String);

impl FromStr for CityType {
    type Err = ParseCityTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseCityTypeError(s.to_string()))
    }
}

/// Caller-supplied values for one salary tax calculation.
///
/// All monetary amounts are in rupees (major currency unit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross annual salary.
    pub annual_gross: Decimal,

    /// Age in years. Accepted and validated, but no slab currently depends on it.
    pub age: u32,

    /// Whether the employee elects the house rent allowance exemption.
    pub has_hra: bool,

    /// HRA received per month. Only used when `has_hra` is set.
    pub monthly_hra: Decimal,

    /// Metro or non-metro city of residence.
    pub city_type: CityType,
}

impl TaxInput {
    /// Creates an input for `annual_gross` with the dashboard's defaults:
    /// age 30, HRA elected with no monthly amount, metro city.
    pub fn new(annual_gross: Decimal) -> Self {
        Self {
            annual_gross,
            age: DEFAULT_AGE,
            has_hra: true,
            monthly_hra: Decimal::ZERO,
            city_type: CityType::Metro,
        }
    }

    /// Returns a copy electing HRA with the given monthly amount.
    pub fn with_hra(
        mut self,
        monthly_hra: Decimal,
        city_type: CityType,
    ) -> Self {
        self.has_hra = true;
        self.monthly_hra = monthly_hra;
        self.city_type = city_type;
        self
    }

    /// Returns a copy with HRA not elected.
    pub fn without_hra(mut self) -> Self {
        self.has_hra = false;
        self
    }

    /// Returns a copy with the given age.
    pub fn with_age(
        mut self,
        age: u32,
    ) -> Self {
        self.age = age;
        self
    }

    /// Checks the input at the boundary, before any calculation runs.
    ///
    /// # Errors
    ///
    /// Returns [`TaxInputError`] if:
    /// - `annual_gross` is negative
    /// - `monthly_hra` is negative
    /// - either amount exceeds [`MAX_AMOUNT`]
    /// - `age` is greater than [`MAX_AGE`]
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::{TaxInput, TaxInputError};
    ///
    /// let input = TaxInput::new(dec!(-1));
    /// assert_eq!(input.validate(), Err(TaxInputError::NegativeGross(dec!(-1))));
    /// ```
    pub fn validate(&self) -> Result<(), TaxInputError> {
        if self.annual_gross < Decimal::ZERO {
            return Err(TaxInputError::NegativeGross(self.annual_gross));
        }
        if self.monthly_hra < Decimal::ZERO {
            return Err(TaxInputError::NegativeMonthlyHra(self.monthly_hra));
        }
        let amounts = [
            ("annual_gross", self.annual_gross),
            ("monthly_hra", self.monthly_hra),
        ];
        for (field, value) in amounts {
            if value > MAX_AMOUNT {
                return Err(TaxInputError::AmountTooLarge { field, value });
            }
        }
        if self.age > MAX_AGE {
            return Err(TaxInputError::AgeOutOfRange(self.age));
        }
        Ok(())
    }
}
