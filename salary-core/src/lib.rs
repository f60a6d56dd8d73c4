pub mod calculations;
pub mod currency;
pub mod models;

pub use calculations::{TaxCalculationEngine, TaxError, compute};
pub use currency::Currency;
pub use models::*;
