use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a progressive income-tax table.
///
/// A slab covers taxable income in `(min_income, max_income]`; the first slab
/// also covers zero. `max_income` is `None` for the open-ended top slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub min_income: Decimal,
    #[serde(default)]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
    pub base_tax: Decimal,
    pub label: String,
}

impl TaxSlab {
    /// Returns `true` if `taxable_income` is at or below this slab's upper bound.
    ///
    /// Slabs are searched in ascending order, so the first slab for which this
    /// holds is the one that applies.
    pub fn contains(
        &self,
        taxable_income: Decimal,
    ) -> bool {
        self.max_income.is_none_or(|max| taxable_income <= max)
    }

    /// Tax due on `taxable_income` when this slab is the marginal one.
    pub fn tax_for(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        self.base_tax + self.rate * (taxable_income - self.min_income)
    }

    /// Tax accumulated at this slab's upper bound, or `None` for the open slab.
    pub fn tax_at_upper_bound(&self) -> Option<Decimal> {
        self.max_income.map(|max| self.tax_for(max))
    }

    /// The 2023-24 new-regime slab table.
    pub fn new_regime() -> Vec<TaxSlab> {
        const TABLE: [(i64, Option<i64>, u32, i64, &str); 6] = [
            (0, Some(300_000), 0, 0, "No Tax (Up to ₹3L)"),
            (300_000, Some(600_000), 5, 0, "5% (₹3L - ₹6L)"),
            (600_000, Some(900_000), 10, 15_000, "10% (₹6L - ₹9L)"),
            (900_000, Some(1_200_000), 15, 45_000, "15% (₹9L - ₹12L)"),
            (1_200_000, Some(1_500_000), 20, 90_000, "20% (₹12L - ₹15L)"),
            (1_500_000, None, 30, 150_000, "30% (Above ₹15L)"),
        ];

        TABLE
            .iter()
            .map(|&(min, max, percent, base, label)| TaxSlab {
                min_income: Decimal::from(min),
                max_income: max.map(Decimal::from),
                rate: Decimal::new(i64::from(percent), 2),
                base_tax: Decimal::from(base),
                label: label.to_string(),
            })
            .collect()
    }
}
