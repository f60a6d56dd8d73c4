//! Annual salary tax calculation under the Indian new tax regime.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Standard deduction: flat allowance, capped at gross |
//! | 2    | HRA exemption: smallest positive of HRA received, rent paid less 10% of basic, and 50%/40% of basic |
//! | 3    | Taxable income: gross - standard deduction - HRA exemption (minimum 0) |
//! | 4    | Income tax from the progressive slab table |
//! | 5    | Health and education cess: 4% of income tax |
//! | 6    | EPF: 12% of basic (40% of gross), capped at ₹1,800 per month |
//! | 7    | ESI: 0.75% of gross while monthly gross is at most ₹21,000, otherwise 0 |
//! | 8    | Professional tax: 0.5% of gross, capped at ₹2,400 |
//! | 9    | Total deductions and net pay |
//!
//! All arithmetic is exact decimal arithmetic; nothing is rounded here.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use salary_core::{CityType, PayrollRules, TaxCalculationEngine, TaxInput};
//!
//! let rules = PayrollRules::default();
//! let engine = TaxCalculationEngine::new(&rules);
//!
//! let input = TaxInput::new(dec!(1200000)).with_hra(dec!(20000), CityType::Metro);
//! let result = engine.compute(&input).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(922000));
//! assert_eq!(result.income_tax, dec!(48300));
//! assert_eq!(result.tax_slab, "15% (₹9L - ₹12L)");
//! assert_eq!(result.net_pay, dec!(1125768));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, trace};

use crate::calculations::common::{max, min, min_positive};
use crate::models::{CityType, PayrollRules, RulesError, TaxInput, TaxInputError, TaxResult, TaxSlab};

const MONTHS_PER_YEAR: i64 = 12;

/// Errors that can occur when computing a tax breakdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The caller supplied an invalid input.
    #[error("invalid input: {0}")]
    Input(#[from] TaxInputError),

    /// The engine was configured with inconsistent rules.
    #[error("invalid payroll rules: {0}")]
    Rules(#[from] RulesError),

    /// No slab covers the taxable income.
    #[error("no tax slab found for taxable income {0}")]
    NoMatchingSlab(Decimal),
}

/// Computes a breakdown with [`PayrollRules::default`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::{TaxInput, compute};
///
/// let result = compute(&TaxInput::new(dec!(350000)).without_hra()).unwrap();
///
/// assert_eq!(result.taxable_income, dec!(300000));
/// assert_eq!(result.income_tax, dec!(0));
/// ```
pub fn compute(input: &TaxInput) -> Result<TaxResult, TaxError> {
    let rules = PayrollRules::default();
    TaxCalculationEngine::new(&rules).compute(input)
}

/// Calculator for the annual salary tax breakdown.
///
/// Holds no state besides the borrowed rules; every call to
/// [`compute`](Self::compute) is independent.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculationEngine<'a> {
    rules: &'a PayrollRules,
}

impl<'a> TaxCalculationEngine<'a> {
    /// Creates an engine using `rules`. Rules are validated on every computation.
    pub fn new(rules: &'a PayrollRules) -> Self {
        Self { rules }
    }

    /// The rules this engine applies.
    pub fn rules(&self) -> &'a PayrollRules {
        self.rules
    }

    /// Computes the full deduction and net-pay breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError`] if:
    /// - the input fails [`TaxInput::validate`]
    /// - the rules fail [`PayrollRules::validate`]
    ///
    /// For valid input and rules the computation itself cannot fail.
    pub fn compute(
        &self,
        input: &TaxInput,
    ) -> Result<TaxResult, TaxError> {
        input.validate()?;
        self.rules.validate()?;

        let gross = input.annual_gross;
        trace!(age = input.age, "age accepted; no slab depends on it");

        // Step 1: Standard deduction
        let standard_deduction = self.standard_deduction(gross);

        // Step 2: HRA exemption
        let hra_exemption = if input.has_hra && input.monthly_hra > Decimal::ZERO {
            self.hra_exemption(gross, input.monthly_hra, input.city_type)
        } else {
            Decimal::ZERO
        };

        // Step 3: Taxable income
        let taxable_income = max(gross - standard_deduction - hra_exemption, Decimal::ZERO);

        // Step 4: Slab tax
        let slab = self.slab_for(taxable_income)?;
        let income_tax = slab.tax_for(taxable_income);

        // Steps 5-8: Cess and statutory contributions
        let cess = self.cess(income_tax);
        let epf = self.epf(gross);
        let esi = self.esi(gross);
        let professional_tax = self.professional_tax(gross);

        // Step 9: Aggregate
        let total_deductions = income_tax + cess + epf + esi + professional_tax;
        let net_pay = gross - total_deductions;

        debug!(
            gross = %gross,
            taxable_income = %taxable_income,
            slab = %slab.label,
            total_deductions = %total_deductions,
            net_pay = %net_pay,
            "computed salary tax breakdown"
        );

        Ok(TaxResult {
            gross_pay: gross,
            income_tax,
            cess,
            epf,
            esi,
            professional_tax,
            total_deductions,
            net_pay,
            tax_slab: slab.label.clone(),
            standard_deduction,
            hra_exemption,
            taxable_income,
        })
    }

    /// Flat standard deduction, never more than gross.
    fn standard_deduction(
        &self,
        gross: Decimal,
    ) -> Decimal {
        min(self.rules.standard_deduction, gross)
    }

    /// HRA exemption: the smallest strictly positive candidate, or zero.
    ///
    /// Basic salary is assumed to be `hra_basic_ratio` of gross and rent paid
    /// `assumed_rent_ratio` times the HRA received.
    fn hra_exemption(
        &self,
        gross: Decimal,
        monthly_hra: Decimal,
        city_type: CityType,
    ) -> Decimal {
        let basic_salary = gross * self.rules.hra_basic_ratio;
        let hra_received = monthly_hra * Decimal::from(MONTHS_PER_YEAR);
        let rent_paid = hra_received * self.rules.assumed_rent_ratio;
        let city_ratio = match city_type {
            CityType::Metro => self.rules.hra_metro_ratio,
            CityType::NonMetro => self.rules.hra_non_metro_ratio,
        };

        let candidates = [
            hra_received,
            rent_paid - basic_salary * self.rules.hra_rent_basic_offset,
            basic_salary * city_ratio,
        ];
        let exemption = min_positive(&candidates);

        debug!(
            hra_received = %candidates[0],
            rent_less_basic = %candidates[1],
            basic_share = %candidates[2],
            exemption = %exemption,
            "computed HRA exemption"
        );

        exemption
    }

    /// Finds the first slab whose inclusive upper bound covers `taxable_income`.
    fn slab_for(
        &self,
        taxable_income: Decimal,
    ) -> Result<&'a TaxSlab, TaxError> {
        self.rules
            .slabs
            .iter()
            .find(|slab| slab.contains(taxable_income))
            .ok_or(TaxError::NoMatchingSlab(taxable_income))
    }

    /// Cess on income tax only.
    fn cess(
        &self,
        income_tax: Decimal,
    ) -> Decimal {
        income_tax * self.rules.cess_rate
    }

    /// Annual EPF contribution.
    ///
    /// `min(monthly_basic * rate, monthly_cap) * 12` is evaluated as
    /// `min(annual_basic * rate, monthly_cap * 12)` so no division by twelve
    /// is needed.
    fn epf(
        &self,
        gross: Decimal,
    ) -> Decimal {
        let annual_basic = gross * self.rules.epf_basic_ratio;
        let annual_cap = self.rules.epf_monthly_cap * Decimal::from(MONTHS_PER_YEAR);
        min(annual_basic * self.rules.epf_rate, annual_cap)
    }

    /// Annual ESI contribution. Drops to zero once monthly gross exceeds the
    /// threshold (`gross / 12 <= threshold` is checked as `gross <= threshold * 12`).
    fn esi(
        &self,
        gross: Decimal,
    ) -> Decimal {
        let annual_threshold = self.rules.esi_monthly_threshold * Decimal::from(MONTHS_PER_YEAR);
        if gross <= annual_threshold {
            gross * self.rules.esi_rate
        } else {
            Decimal::ZERO
        }
    }

    /// Annual professional tax, capped.
    fn professional_tax(
        &self,
        gross: Decimal,
    ) -> Decimal {
        min(self.rules.professional_tax_cap, gross * self.rules.professional_tax_rate)
    }
}
