//! CLI entry point for the data validation pipeline.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use data_validation::{
    DegeneratePolicy, ImputationOutcome, Pipeline, ValidationConfig, ValidationRun,
};
use std::path::PathBuf;
use tracing::info;

/// CLI-compatible degenerate column policy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDegeneratePolicy {
    /// Leave the column unfilled and record the skip in the report
    Skip,
    /// Abort the run
    Fail,
}

impl From<CliDegeneratePolicy> for DegeneratePolicy {
    fn from(cli: CliDegeneratePolicy) -> Self {
        match cli {
            CliDegeneratePolicy::Skip => DegeneratePolicy::Skip,
            CliDegeneratePolicy::Fail => DegeneratePolicy::Fail,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular data validation and cleaning",
    long_about = "Validates a CSV file and writes a cleaned copy plus a JSON report.\n\n\
                  OUTPUTS:\n  \
                  <OUTPUT_DIR>/cleaned_<file name>\n  \
                  <OUTPUT_DIR>/validation_report_<file stem>.json\n\n\
                  EXAMPLES:\n  \
                  data-validation data.csv out/\n\n  \
                  # Treat a column as numeric when 95% of its cells parse\n  \
                  data-validation data.csv out/ --numeric-threshold 0.95\n\n  \
                  # Print the run summary as JSON\n  \
                  data-validation data.csv out/ --json"
)]
struct Args {
    /// Path to the CSV file to validate
    input: PathBuf,

    /// Directory the cleaned data and report are written to (created if missing)
    output_dir: PathBuf,

    /// Fraction of non-null cells that must parse as numbers for a column
    /// to be numeric (greater than 0.0, at most 1.0)
    #[arg(long, default_value = "1.0")]
    numeric_threshold: f64,

    /// What to do with a numeric column that has missing cells and no values
    #[arg(long, value_enum, default_value = "skip")]
    degenerate: CliDegeneratePolicy,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output the run summary as JSON instead of human-readable text
    ///
    /// Disables all logs so stdout only carries the JSON.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = ValidationConfig::builder()
        .numeric_threshold(args.numeric_threshold)
        .degenerate_policy(args.degenerate.into())
        .build()?;

    let pipeline = Pipeline::builder().config(config).build()?;

    info!("Validating {}", args.input.display());
    let run = pipeline.execute(&args.input, &args.output_dir)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.summary)?);
        return Ok(());
    }

    print_human_readable_summary(&run);
    Ok(())
}

/// Print a human-readable summary of the run.
fn print_human_readable_summary(run: &ValidationRun) {
    let report = &run.report;

    println!();
    println!("{}", "=".repeat(80));
    println!("VALIDATION COMPLETE");
    println!("{}", "=".repeat(80));
    println!();
    println!("Cleaned data: {}", run.summary.cleaned_data_path.display());
    println!("Report:       {}", run.summary.report_path.display());
    println!();

    println!("Findings:");
    println!("  Missing cells: {}", report.total_missing());
    println!("  Duplicate rows removed: {}", report.duplicate_rows);
    println!(
        "  Columns: {} numeric, {} categorical",
        report.outliers.len(),
        report.categorical_cardinality.len()
    );

    let total_outliers: usize = report.outliers.values().sum();
    if total_outliers > 0 {
        println!("  Outliers:");
        for (column, count) in report.outliers.iter().filter(|(_, c)| **c > 0) {
            println!("    - {}: {}", column, count);
        }
    }

    let skipped: Vec<_> = report
        .imputation
        .iter()
        .filter_map(|(column, outcome)| match outcome {
            ImputationOutcome::Skipped { reason } => Some((column, reason)),
            _ => None,
        })
        .collect();
    if !skipped.is_empty() {
        println!("  Not imputed:");
        for (column, reason) in skipped {
            println!("    - {}: {}", column, reason);
        }
    }
    println!();
}
