use std::io::Read;

use rust_decimal::Decimal;
use salary_core::{RulesError, TaxSlab, validate_slabs};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::decimal::{deserialize_decimal, deserialize_optional_decimal};

/// Errors that can occur when loading a slab table.
#[derive(Debug, Error)]
pub enum SlabLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid slab table: {0}")]
    InvalidTable(#[from] RulesError),
}

impl From<csv::Error> for SlabLoaderError {
    fn from(err: csv::Error) -> Self {
        SlabLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a slab table CSV file.
///
/// - `min_income`: Lower bound of the slab (exclusive, except for the first slab)
/// - `max_income`: Inclusive upper bound (empty for the open-ended top slab)
/// - `rate`: Marginal rate as a decimal (e.g., 0.05 for 5%)
/// - `base_tax`: Tax accumulated by all lower slabs
/// - `label`: Display label for the slab
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxSlabRecord {
    #[serde(deserialize_with = "deserialize_decimal")]
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub base_tax: Decimal,
    pub label: String,
}

impl From<TaxSlabRecord> for TaxSlab {
    fn from(record: TaxSlabRecord) -> Self {
        TaxSlab {
            min_income: record.min_income,
            max_income: record.max_income,
            rate: record.rate,
            base_tax: record.base_tax,
            label: record.label,
        }
    }
}

/// Loader for slab tables stored as CSV.
///
/// Rows must be in ascending order of `min_income`. The resulting table is
/// validated the same way [`PayrollRules`](salary_core::PayrollRules) validates
/// its built-in slabs.
pub struct SlabLoader;

impl SlabLoader {
    /// Parse slab records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxSlabRecord>, SlabLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxSlabRecord = result?;
            records.push(record);
        }

        debug!(count = records.len(), "parsed slab records");
        Ok(records)
    }

    /// Convert parsed records into a validated slab table.
    pub fn into_slabs(records: Vec<TaxSlabRecord>) -> Result<Vec<TaxSlab>, SlabLoaderError> {
        let slabs: Vec<TaxSlab> = records.into_iter().map(TaxSlab::from).collect();
        validate_slabs(&slabs)?;
        Ok(slabs)
    }

    /// Parse and validate in one step.
    pub fn load<R: Read>(reader: R) -> Result<Vec<TaxSlab>, SlabLoaderError> {
        Self::into_slabs(Self::parse(reader)?)
    }
}
