mod payroll_rules;
mod tax_input;
mod tax_result;
mod tax_slab;

pub use payroll_rules::{PayrollRules, RulesError, validate_slabs};
pub use tax_input::{CityType, DEFAULT_AGE, MAX_AGE, MAX_AMOUNT, ParseCityTypeError, TaxInput, TaxInputError};
pub use tax_result::TaxResult;
pub use tax_slab::TaxSlab;
