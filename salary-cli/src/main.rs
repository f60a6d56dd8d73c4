use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use salary_core::calculations::common::round_half_up;
use salary_core::currency::{Currency, convert_currency, format_compact, format_currency, parse_amount};
use salary_core::{CityType, DEFAULT_AGE, TaxCalculationEngine, TaxInput};
use salary_data::InputLoader;

mod config;
mod logging;
mod report;

use report::BatchRow;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Annual salary tax calculator for the Indian new tax regime.
///
/// Computes income tax, cess, EPF, ESI and professional tax for a gross
/// salary and reports the resulting net pay.
#[derive(Debug, Parser)]
#[command(name = "salary", version, about)]
struct Cli {
    /// TOML file overriding the built-in payroll rules.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV file replacing the income-tax slab table.
    #[arg(long, global = true)]
    slabs: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `salary_core=trace`). Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute the breakdown for a single salary.
    Calculate(CalculateArgs),

    /// Compute breakdowns for every row of an input CSV file.
    Batch(BatchArgs),

    /// Format an amount for display.
    Format(FormatArgs),

    /// Convert an amount between rupees and dollars at the fixed rate.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
struct CalculateArgs {
    /// Annual gross salary in rupees (commas allowed).
    #[arg(long, value_parser = parse_amount)]
    gross: Decimal,

    /// Age in years.
    #[arg(long, default_value_t = DEFAULT_AGE)]
    age: u32,

    /// House rent allowance received per month, in rupees.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    monthly_hra: Decimal,

    /// Do not claim the HRA exemption.
    #[arg(long)]
    no_hra: bool,

    /// City classification: `metro` or `non-metro`.
    #[arg(long, default_value = "metro")]
    city: CityType,

    /// Display currency for the breakdown.
    #[arg(long, default_value = "INR")]
    currency: Currency,

    /// Print the raw result as JSON instead of a formatted breakdown.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV file with columns annual_gross, age, has_hra, monthly_hra, city_type.
    #[arg(short, long)]
    file: PathBuf,

    /// Print a JSON array of results instead of CSV.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct FormatArgs {
    /// Amount to format.
    #[arg(value_parser = parse_amount, allow_negative_numbers = true)]
    amount: Decimal,

    /// Currency to format in.
    #[arg(long, default_value = "INR")]
    currency: Currency,

    /// Use lakh/crore abbreviations for rupee amounts.
    #[arg(long)]
    compact: bool,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Amount to convert.
    #[arg(value_parser = parse_amount, allow_negative_numbers = true)]
    amount: Decimal,

    /// Source currency.
    #[arg(long)]
    from: Currency,

    /// Target currency.
    #[arg(long)]
    to: Currency,
}

// ─── commands ────────────────────────────────────────────────────────────────

fn calculate(
    args: CalculateArgs,
    config: Option<&Path>,
    slabs: Option<&Path>,
) -> Result<()> {
    let rules = config::load_rules(config, slabs)?;
    let engine = TaxCalculationEngine::new(&rules);

    let input = TaxInput {
        annual_gross: args.gross,
        age: args.age,
        has_hra: !args.no_hra,
        monthly_hra: args.monthly_hra,
        city_type: args.city,
    };
    debug!(?input, "calculating");

    let result = engine.compute(&input).context("Failed to compute tax")?;

    if args.json {
        println!("{}", report::render_json(&result)?);
    } else {
        print!("{}", report::render_breakdown(&result, args.currency));
    }
    Ok(())
}

fn batch(
    args: BatchArgs,
    config: Option<&Path>,
    slabs: Option<&Path>,
) -> Result<()> {
    let rules = config::load_rules(config, slabs)?;
    let engine = TaxCalculationEngine::new(&rules);

    let inputs = InputLoader::load_from_file(&args.file)
        .with_context(|| format!("Failed to load inputs: {}", args.file.display()))?;
    info!(count = inputs.len(), file = %args.file.display(), "loaded inputs");

    let mut results = Vec::with_capacity(inputs.len());
    for (idx, input) in inputs.iter().enumerate() {
        let result = engine
            .compute(input)
            .with_context(|| format!("Failed to compute row {}", idx + 1))?;
        results.push(result);
    }

    if args.json {
        println!("{}", report::render_json(&results)?);
    } else {
        let rows: Vec<BatchRow> = inputs
            .iter()
            .zip(&results)
            .map(|(input, result)| BatchRow::new(input, result))
            .collect();
        report::write_batch_csv(&rows, io::stdout().lock())?;
    }
    Ok(())
}

fn format_amount(args: &FormatArgs) -> String {
    if args.compact {
        format_compact(args.amount, args.currency)
    } else {
        format_currency(args.amount, args.currency)
    }
}

/// Converted amount rounded to two places, followed by the target code.
fn convert_amount(args: &ConvertArgs) -> String {
    let mut converted = round_half_up(convert_currency(args.amount, args.from, args.to));
    converted.rescale(2);
    format!("{converted} {}", args.to)
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let config = cli.config.as_deref();
    let slabs = cli.slabs.as_deref();

    match cli.command {
        Command::Calculate(args) => calculate(args, config, slabs),
        Command::Batch(args) => batch(args, config, slabs),
        Command::Format(args) => {
            println!("{}", format_amount(&args));
            Ok(())
        }
        Command::Convert(args) => {
            println!("{}", convert_amount(&args));
            Ok(())
        }
    }
}
