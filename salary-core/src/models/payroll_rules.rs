use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TaxSlab;

/// Errors raised when a [`PayrollRules`] configuration is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// A ratio or rate field must be between 0 and 1.
    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    /// An amount, cap or threshold field must be non-negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The assumed rent ratio must be positive.
    #[error("assumed rent ratio must be positive, got {0}")]
    InvalidRentRatio(Decimal),

    /// The slab table is empty.
    #[error("no tax slabs configured")]
    NoTaxSlabs,

    /// The first slab must start at zero taxable income.
    #[error("first tax slab must start at 0, got {0}")]
    SlabTableMustStartAtZero(Decimal),

    /// A slab does not start where the previous one ended.
    #[error("tax slab {index} does not start at the previous slab's upper bound")]
    SlabGap { index: usize },

    /// A bounded slab has an upper bound at or below its lower bound.
    #[error("tax slab {index} has an empty income range")]
    EmptySlab { index: usize },

    /// The last slab must be open-ended.
    #[error("last tax slab must be open-ended")]
    MissingOpenEndedSlab,

    /// Only the last slab may be open-ended.
    #[error("tax slab {index} is open-ended but is not the last slab")]
    OpenEndedSlabNotLast { index: usize },

    /// A slab's base tax must equal the tax accumulated by the slabs below it.
    #[error("tax slab {index} has base tax {actual}, expected {expected}")]
    InconsistentBaseTax {
        index: usize,
        expected: Decimal,
        actual: Decimal,
    },

    /// A slab's marginal rate must be between 0 and 1.
    #[error("tax slab {index} has rate {rate}, expected a value between 0 and 1")]
    InvalidSlabRate { index: usize, rate: Decimal },
}

/// Statutory constants and simplifying assumptions used by the tax engine.
///
/// [`PayrollRules::default`] reproduces the 2023-24 new regime. Every field
/// can be overridden from a config file; fields left out keep their default.
///
/// The HRA and EPF steps each carry their own basic-salary ratio
/// (`hra_basic_ratio` and `epf_basic_ratio`). They differ by default and are
/// never derived from one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollRules {
    /// Flat standard deduction, capped at gross income.
    pub standard_deduction: Decimal,

    /// Basic salary as a share of gross, for the HRA exemption.
    pub hra_basic_ratio: Decimal,

    /// Rent paid as a multiple of HRA received.
    pub assumed_rent_ratio: Decimal,

    /// Share of basic salary subtracted from rent paid.
    pub hra_rent_basic_offset: Decimal,

    /// Share of basic salary allowed as exemption in metro cities.
    pub hra_metro_ratio: Decimal,

    /// Share of basic salary allowed as exemption in non-metro cities.
    pub hra_non_metro_ratio: Decimal,

    /// Progressive slab table, ascending.
    pub slabs: Vec<TaxSlab>,

    /// Health and education cess on income tax.
    pub cess_rate: Decimal,

    /// Basic salary as a share of gross, for EPF.
    pub epf_basic_ratio: Decimal,

    /// Employee EPF contribution rate on basic salary.
    pub epf_rate: Decimal,

    /// Monthly EPF contribution ceiling.
    pub epf_monthly_cap: Decimal,

    /// ESI applies only while monthly gross is at or below this amount.
    pub esi_monthly_threshold: Decimal,

    /// Employee ESI contribution rate on gross.
    pub esi_rate: Decimal,

    /// Professional tax rate on gross.
    pub professional_tax_rate: Decimal,

    /// Annual professional tax ceiling.
    pub professional_tax_cap: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            standard_deduction: Decimal::from(50_000),
            hra_basic_ratio: Decimal::new(5, 1),
            assumed_rent_ratio: Decimal::new(12, 1),
            hra_rent_basic_offset: Decimal::new(1, 1),
            hra_metro_ratio: Decimal::new(5, 1),
            hra_non_metro_ratio: Decimal::new(4, 1),
            slabs: TaxSlab::new_regime(),
            cess_rate: Decimal::new(4, 2),
            epf_basic_ratio: Decimal::new(4, 1),
            epf_rate: Decimal::new(12, 2),
            epf_monthly_cap: Decimal::from(1_800),
            esi_monthly_threshold: Decimal::from(21_000),
            esi_rate: Decimal::new(75, 4),
            professional_tax_rate: Decimal::new(5, 3),
            professional_tax_cap: Decimal::from(2_400),
        }
    }
}

impl PayrollRules {
    /// Validates every rate, amount and the slab table.
    ///
    /// # Errors
    ///
    /// Returns the first [`RulesError`] found.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use salary_core::{PayrollRules, RulesError};
    ///
    /// let rules = PayrollRules {
    ///     cess_rate: dec!(1.5),
    ///     ..PayrollRules::default()
    /// };
    ///
    /// assert_eq!(
    ///     rules.validate(),
    ///     Err(RulesError::RateOutOfRange { field: "cess_rate", value: dec!(1.5) })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), RulesError> {
        let rates = [
            ("hra_basic_ratio", self.hra_basic_ratio),
            ("hra_rent_basic_offset", self.hra_rent_basic_offset),
            ("hra_metro_ratio", self.hra_metro_ratio),
            ("hra_non_metro_ratio", self.hra_non_metro_ratio),
            ("cess_rate", self.cess_rate),
            ("epf_basic_ratio", self.epf_basic_ratio),
            ("epf_rate", self.epf_rate),
            ("esi_rate", self.esi_rate),
            ("professional_tax_rate", self.professional_tax_rate),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(RulesError::RateOutOfRange { field, value });
            }
        }

        let amounts = [
            ("standard_deduction", self.standard_deduction),
            ("epf_monthly_cap", self.epf_monthly_cap),
            ("esi_monthly_threshold", self.esi_monthly_threshold),
            ("professional_tax_cap", self.professional_tax_cap),
        ];
        for (field, value) in amounts {
            if value < Decimal::ZERO {
                return Err(RulesError::NegativeAmount { field, value });
            }
        }

        if self.assumed_rent_ratio <= Decimal::ZERO {
            return Err(RulesError::InvalidRentRatio(self.assumed_rent_ratio));
        }

        validate_slabs(&self.slabs)
    }
}

/// Checks that a slab table is contiguous, starts at zero, ends open-ended,
/// and that each base tax equals the tax accumulated below it.
pub fn validate_slabs(slabs: &[TaxSlab]) -> Result<(), RulesError> {
    let first = slabs.first().ok_or(RulesError::NoTaxSlabs)?;
    if first.min_income != Decimal::ZERO {
        return Err(RulesError::SlabTableMustStartAtZero(first.min_income));
    }
    if first.base_tax != Decimal::ZERO {
        return Err(RulesError::InconsistentBaseTax {
            index: 0,
            expected: Decimal::ZERO,
            actual: first.base_tax,
        });
    }

    let last_index = slabs.len() - 1;
    for (index, slab) in slabs.iter().enumerate() {
        if slab.rate < Decimal::ZERO || slab.rate > Decimal::ONE {
            return Err(RulesError::InvalidSlabRate {
                index,
                rate: slab.rate,
            });
        }

        match slab.max_income {
            Some(max) if max <= slab.min_income => {
                return Err(RulesError::EmptySlab { index });
            }
            None if index != last_index => {
                return Err(RulesError::OpenEndedSlabNotLast { index });
            }
            _ => {}
        }

        if index > 0 {
            let previous = &slabs[index - 1];
            if previous.max_income != Some(slab.min_income) {
                return Err(RulesError::SlabGap { index });
            }
            let expected = previous.tax_for(slab.min_income);
            if slab.base_tax != expected {
                return Err(RulesError::InconsistentBaseTax {
                    index,
                    expected,
                    actual: slab.base_tax,
                });
            }
        }
    }

    if slabs[last_index].max_income.is_some() {
        return Err(RulesError::MissingOpenEndedSlab);
    }

    Ok(())
}
