//! Salary tax calculations.
//!
//! This module provides the calculation logic that turns a [`TaxInput`](crate::TaxInput)
//! into a full deduction and net-pay breakdown.

pub mod common;
pub mod engine;

pub use engine::{TaxCalculationEngine, TaxError, compute};
