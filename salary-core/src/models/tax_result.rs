use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual deduction and net-pay breakdown for one [`TaxInput`](super::TaxInput).
///
/// Amounts are exact (unrounded). For every result produced by the engine,
/// `total_deductions` is the sum of the five deduction terms and
/// `net_pay + total_deductions == gross_pay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_pay: Decimal,
    pub income_tax: Decimal,
    pub cess: Decimal,
    pub epf: Decimal,
    pub esi: Decimal,
    pub professional_tax: Decimal,
    pub total_deductions: Decimal,
    pub net_pay: Decimal,

    /// Label of the marginal slab applied to taxable income.
    pub tax_slab: String,

    // Intermediate values
    pub standard_deduction: Decimal,
    pub hra_exemption: Decimal,
    pub taxable_income: Decimal,
}

impl TaxResult {
    /// Income tax including cess.
    pub fn total_income_tax(&self) -> Decimal {
        self.income_tax + self.cess
    }

    /// Net pay spread evenly over twelve months.
    pub fn monthly_net_pay(&self) -> Decimal {
        self.net_pay / Decimal::from(12)
    }

    /// Total deductions as a percentage of gross pay; zero when gross is zero.
    pub fn deduction_percentage(&self) -> Decimal {
        if self.gross_pay.is_zero() {
            return Decimal::ZERO;
        }
        self.total_deductions / self.gross_pay * Decimal::ONE_HUNDRED
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn result(
        gross: Decimal,
        total: Decimal,
    ) -> TaxResult {
        TaxResult {
            gross_pay: gross,
            income_tax: dec!(1000),
            cess: dec!(40),
            epf: Decimal::ZERO,
            esi: Decimal::ZERO,
            professional_tax: Decimal::ZERO,
            total_deductions: total,
            net_pay: gross - total,
            tax_slab: "5% (₹3L - ₹6L)".to_string(),
            standard_deduction: Decimal::ZERO,
            hra_exemption: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
        }
    }

    #[test]
    fn total_income_tax_includes_cess() {
        assert_eq!(result(dec!(100000), dec!(1040)).total_income_tax(), dec!(1040));
    }

    #[test]
    fn monthly_net_pay_divides_by_twelve() {
        assert_eq!(result(dec!(1200000), dec!(74232)).monthly_net_pay(), dec!(93814));
    }

    #[test]
    fn deduction_percentage_of_gross() {
        assert_eq!(result(dec!(200000), dec!(5000)).deduction_percentage(), dec!(2.5));
    }

    #[test]
    fn deduction_percentage_is_zero_for_zero_gross() {
        assert_eq!(result(Decimal::ZERO, Decimal::ZERO).deduction_percentage(), Decimal::ZERO);
    }
}
