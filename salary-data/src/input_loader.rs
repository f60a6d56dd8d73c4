//! CSV loader for batches of salary tax inputs.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column         | Required | Type    | Default when empty |
//! |----------------|----------|---------|--------------------|
//! | `annual_gross` | yes      | decimal |                    |
//! | `age`          | no       | integer | `30`               |
//! | `has_hra`      | no       | boolean | `true`             |
//! | `monthly_hra`  | no       | decimal | `0`                |
//! | `city_type`    | no       | string  | `metro`            |
//!
//! `city_type` is one of `metro` or `non-metro`.
//!
//! ### Example
//!
//! ```csv
//! annual_gross,age,has_hra,monthly_hra,city_type
//! 1200000,30,true,20000,metro
//! 450000,,false,,
//! ```
use std::path::Path;

use rust_decimal::Decimal;
use salary_core::{CityType, DEFAULT_AGE, TaxInput};
use serde::Deserialize;
use tracing::debug;

use crate::decimal::{deserialize_decimal, deserialize_optional_decimal};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(deserialize_with = "deserialize_decimal")]
    annual_gross: Decimal,
    age: Option<u32>,
    has_hra: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    monthly_hra: Option<Decimal>,
    city_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting input CSV data.
#[derive(Debug, thiserror::Error)]
pub enum InputLoaderError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `city_type` cell was not a recognised city classification.
    /// `row` is 1-based (header = row 0).
    #[error("unrecognised city type '{city_type}' on row {row}")]
    InvalidCityType { city_type: String, row: usize },

    /// The input file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Loader for [`TaxInput`] batches.
pub struct InputLoader;

impl InputLoader {
    /// Convert a single CSV row into a TaxInput.
    ///
    /// row_number is 1-based (for error messages).
    fn convert_row(
        row: CsvRow,
        row_number: usize,
    ) -> Result<TaxInput, InputLoaderError> {
        let city_type = match row.city_type {
            Some(city) if !city.trim().is_empty() => CityType::parse(&city).ok_or(
                InputLoaderError::InvalidCityType {
                    city_type: city,
                    row: row_number,
                },
            )?,
            _ => CityType::Metro,
        };

        Ok(TaxInput {
            annual_gross: row.annual_gross,
            age: row.age.unwrap_or(DEFAULT_AGE),
            has_hra: row.has_hra.unwrap_or(true),
            monthly_hra: row.monthly_hra.unwrap_or(Decimal::ZERO),
            city_type,
        })
    }

    /// Parse CSV text and return the inputs in file order.
    ///
    /// Inputs are not validated here; the engine validates each one.
    ///
    /// # Errors
    ///
    /// * [InputLoaderError::Parse] – if the CSV is structurally invalid or a
    ///   required field cannot be deserialised.
    /// * [InputLoaderError::InvalidCityType] – if any row contains an
    ///   unrecognised city type.
    pub fn load_from_str(input: &str) -> Result<Vec<TaxInput>, InputLoaderError> {
        Self::load_from_reader(input.as_bytes())
    }

    /// Same as [load_from_str](Self::load_from_str) for any reader.
    pub fn load_from_reader<R: std::io::Read>(
        reader: R
    ) -> Result<Vec<TaxInput>, InputLoaderError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All) // tolerate whitespace around values
            .flexible(false) // strict column count
            .from_reader(reader);

        let inputs = reader
            .deserialize::<CsvRow>()
            .enumerate()
            .map(|(idx, result)| {
                let row = result?;
                Self::convert_row(row, idx + 1)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = inputs.len(), "loaded tax inputs");
        Ok(inputs)
    }

    /// Read a file from disk and delegate to [load_from_str](Self::load_from_str).
    pub fn load_from_file(path: &Path) -> Result<Vec<TaxInput>, InputLoaderError> {
        let contents = std::fs::read_to_string(path).map_err(|source| InputLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_str(&contents)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const MINIMAL_CSV: &str = "\
annual_gross
750000
";

    const FULL_CSV: &str = "\
annual_gross,age,has_hra,monthly_hra,city_type
1200000,30,true,20000,metro
600000,45,true,10000,non-metro
";

    const SPARSE_CSV: &str = "\
city_type,annual_gross,monthly_hra,has_hra,age
,450000,,false,
  Non-Metro , 900000.50 , 7500 ,true, 61
";

    // -----------------------------------------------------------------------
    // 1. Minimal CSV – only the required column, defaults applied
    // -----------------------------------------------------------------------
    #[test]
    fn test_minimal_csv_applies_defaults() {
        let inputs = InputLoader::load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(inputs, vec![TaxInput::new(dec!(750000))]);
    }

    // -----------------------------------------------------------------------
    // 2. Full CSV – every column populated
    // -----------------------------------------------------------------------
    #[test]
    fn test_full_csv_all_fields_populated() {
        let inputs = InputLoader::load_from_str(FULL_CSV).expect("should parse full CSV");

        assert_eq!(inputs.len(), 2);
        assert_eq!(
            inputs[0],
            TaxInput::new(dec!(1200000)).with_hra(dec!(20000), CityType::Metro)
        );
        assert_eq!(inputs[1].age, 45);
        assert_eq!(inputs[1].city_type, CityType::NonMetro);
        assert_eq!(inputs[1].monthly_hra, dec!(10000));
    }

    // -----------------------------------------------------------------------
    // 3. Column order, whitespace and empty cells
    // -----------------------------------------------------------------------
    #[test]
    fn test_sparse_csv_in_any_column_order() {
        let inputs = InputLoader::load_from_str(SPARSE_CSV).expect("should parse sparse CSV");

        assert_eq!(inputs[0], TaxInput::new(dec!(450000)).without_hra());
        assert_eq!(inputs[1].annual_gross, dec!(900000.50));
        assert_eq!(inputs[1].city_type, CityType::NonMetro);
        assert_eq!(inputs[1].monthly_hra, dec!(7500));
        assert_eq!(inputs[1].age, 61);
    }

    // -----------------------------------------------------------------------
    // 4. Errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_invalid_city_type_reports_row() {
        let csv = "\
annual_gross,city_type
500000,metro
500000,suburb
";

        let err = InputLoader::load_from_str(csv).unwrap_err();

        match err {
            InputLoaderError::InvalidCityType { city_type, row } => {
                assert_eq!(city_type, "suburb");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_column_is_parse_error() {
        let csv = "age\n30\n";

        let err = InputLoader::load_from_str(csv).unwrap_err();

        assert!(matches!(err, InputLoaderError::Parse(_)));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "annual_gross,age\n500000,30,extra\n";

        let err = InputLoader::load_from_str(csv).unwrap_err();

        assert!(matches!(err, InputLoaderError::Parse(_)));
    }

    #[test]
    fn test_empty_file_yields_no_inputs() {
        let inputs = InputLoader::load_from_str("annual_gross\n").unwrap();

        assert!(inputs.is_empty());
    }

    #[test]
    fn test_amounts_keep_every_digit() {
        let csv = "\
annual_gross,monthly_hra
1234567.123456789012345,20000.000000000000000001
";

        let inputs = InputLoader::load_from_str(csv).unwrap();

        assert_eq!(inputs[0].annual_gross, dec!(1234567.123456789012345));
        assert_eq!(inputs[0].monthly_hra, dec!(20000.000000000000000001));
    }

    #[test]
    fn test_non_numeric_amount_is_parse_error() {
        let err = InputLoader::load_from_str("annual_gross
twelve lakh
").unwrap_err();

        assert!(matches!(err, InputLoaderError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = InputLoader::load_from_file(Path::new("does/not/exist.csv")).unwrap_err();

        assert!(matches!(err, InputLoaderError::Io { .. }));
    }
}
