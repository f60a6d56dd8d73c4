//! Payroll rule configuration.
//!
//! Rules start from [`PayrollRules::default`]. A TOML file may override any
//! subset of fields, and a slab CSV file replaces the slab table last.
//!
//! ```toml
//! standard_deduction = 75000
//! professional_tax_cap = 2500
//!
//! [[slabs]]
//! min_income = 0
//! max_income = 300000
//! rate = 0
//! base_tax = 0
//! label = "No Tax (Up to ₹3L)"
//! ```

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use salary_core::PayrollRules;
use salary_data::SlabLoader;
use tracing::{debug, info};

/// Parses rules from TOML text. Fields not present keep their default value.
pub fn parse_rules(text: &str) -> Result<PayrollRules> {
    let rules: PayrollRules = toml::from_str(text).context("invalid rules TOML")?;
    Ok(rules)
}

/// Builds the effective rules from an optional TOML file and an optional
/// slab CSV file, then validates them.
pub fn load_rules(
    config: Option<&Path>,
    slabs: Option<&Path>,
) -> Result<PayrollRules> {
    let mut rules = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let rules = parse_rules(&text)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            info!(path = %path.display(), "loaded payroll rules");
            rules
        }
        None => PayrollRules::default(),
    };

    if let Some(path) = slabs {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        rules.slabs = SlabLoader::load(file)
            .with_context(|| format!("Failed to load slabs: {}", path.display()))?;
        info!(path = %path.display(), count = rules.slabs.len(), "loaded slab table");
    }

    rules.validate().context("Payroll rules are invalid")?;
    debug!(slabs = rules.slabs.len(), "payroll rules ready");

    Ok(rules)
}
