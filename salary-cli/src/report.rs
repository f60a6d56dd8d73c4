//! Rendering of tax results for the terminal, CSV and JSON.

use std::io::Write;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use salary_core::calculations::common::round_half_up;
use salary_core::currency::{Currency, convert_currency, format_currency};
use salary_core::{CityType, TaxInput, TaxResult};
use serde::Serialize;

const LABEL_WIDTH: usize = 20;

/// Renders a human-readable breakdown. Amounts are converted from rupees
/// when another display currency is requested.
pub fn render_breakdown(
    result: &TaxResult,
    currency: Currency,
) -> String {
    let money = |amount: Decimal| {
        format_currency(convert_currency(amount, Currency::Inr, currency), currency)
    };

    let lines = [
        ("Gross pay", money(result.gross_pay)),
        ("Standard deduction", money(result.standard_deduction)),
        ("HRA exemption", money(result.hra_exemption)),
        ("Taxable income", money(result.taxable_income)),
        ("Tax slab", result.tax_slab.clone()),
        ("Income tax", money(result.income_tax)),
        ("Cess", money(result.cess)),
        ("EPF", money(result.epf)),
        ("ESI", money(result.esi)),
        ("Professional tax", money(result.professional_tax)),
        ("Total deductions", money(result.total_deductions)),
        ("Net pay", money(result.net_pay)),
        ("Monthly net pay", money(result.monthly_net_pay())),
        (
            "Deductions",
            format!("{}% of gross", round_half_up(result.deduction_percentage())),
        ),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{label:<width$}{value}\n", width = LABEL_WIDTH))
        .collect()
}

/// Renders a result as pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize result")
}

/// One output row of a batch run: the input echoed back with the rounded breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub annual_gross: Decimal,
    pub age: u32,
    pub has_hra: bool,
    pub monthly_hra: Decimal,
    pub city_type: CityType,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub cess: Decimal,
    pub epf: Decimal,
    pub esi: Decimal,
    pub professional_tax: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,
    pub tax_slab: String,
}

impl BatchRow {
    pub fn new(
        input: &TaxInput,
        result: &TaxResult,
    ) -> Self {
        Self {
            annual_gross: input.annual_gross,
            age: input.age,
            has_hra: input.has_hra,
            monthly_hra: input.monthly_hra,
            city_type: input.city_type,
            taxable_income: paise(result.taxable_income),
            income_tax: paise(result.income_tax),
            cess: paise(result.cess),
            epf: paise(result.epf),
            esi: paise(result.esi),
            professional_tax: paise(result.professional_tax),
            total_deductions: paise(result.total_deductions),
            net_pay: paise(result.net_pay),
            tax_slab: result.tax_slab.clone(),
        }
    }
}

/// Rounds to paise and always shows two decimal places.
fn paise(amount: Decimal) -> Decimal {
    let mut rounded = round_half_up(amount);
    rounded.rescale(2);
    rounded
}

/// Writes batch rows as CSV with a header line.
pub fn write_batch_csv<W: Write>(
    rows: &[BatchRow],
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row).context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use salary_core::compute;

    use super::*;

    fn fixture() -> (TaxInput, TaxResult) {
        let input = TaxInput::new(dec!(1200000)).with_hra(dec!(20000), CityType::Metro);
        let result = compute(&input).unwrap();
        (input, result)
    }

    fn line(
        label: &str,
        value: &str,
    ) -> String {
        format!("{label:<20}{value}\n")
    }

    #[test]
    fn breakdown_lists_every_line_in_rupees() {
        let (_, result) = fixture();

        let text = render_breakdown(&result, Currency::Inr);

        assert!(text.starts_with(&line("Gross pay", "₹12,00,000")));
        assert!(text.contains(&line("HRA exemption", "₹2,28,000")));
        assert!(text.contains(&line("Tax slab", "15% (₹9L - ₹12L)")));
        assert!(text.contains(&line("Total deductions", "₹74,232")));
        assert!(text.contains(&line("Net pay", "₹11,25,768")));
        assert!(text.contains(&line("Monthly net pay", "₹93,814")));
        assert!(text.ends_with(&line("Deductions", "6.19% of gross")));
        assert_eq!(text.lines().count(), 14);
    }

    #[test]
    fn breakdown_converts_to_dollars() {
        let (_, result) = fixture();

        let text = render_breakdown(&result, Currency::Usd);

        // 1200000 / 83 = 14457.83...
        assert!(text.starts_with(&line("Gross pay", "$14,458")));
    }

    #[test]
    fn batch_row_rounds_to_paise() {
        let input = TaxInput::new(dec!(350001)).without_hra();
        let result = compute(&input).unwrap();

        let row = BatchRow::new(&input, &result);

        assert_eq!(row.income_tax, dec!(0.05));
        assert_eq!(row.cess, dec!(0.00));
        assert_eq!(row.tax_slab, "5% (₹3L - ₹6L)");
    }

    #[test]
    fn batch_csv_has_header_and_rows() {
        let (input, result) = fixture();
        let rows = vec![BatchRow::new(&input, &result)];
        let mut out = Vec::new();

        write_batch_csv(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "annual_gross,age,has_hra,monthly_hra,city_type,taxable_income,income_tax,cess,epf,esi,professional_tax,total_deductions,net_pay,tax_slab"
            )
        );
        assert_eq!(
            lines.next(),
            Some("1200000,30,true,20000,metro,922000.00,48300.00,1932.00,21600.00,0.00,2400.00,74232.00,1125768.00,15% (₹9L - ₹12L)")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_contains_slab_label() {
        let (_, result) = fixture();

        let json = render_json(&result).unwrap();

        assert!(json.contains("\"tax_slab\": \"15% (₹9L - ₹12L)\""));
        assert!(json.contains("\"net_pay\""));
    }
}
