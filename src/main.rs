use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use employee_etl::pipeline::{Pipeline, PipelineConfig};

/// Batch ETL for employee analytics: clean, validate, aggregate, and load the
/// five source tables.
#[derive(Debug, Parser)]
#[command(name = "employee-etl", version, about)]
struct Cli {
    /// Directory holding the raw CSV snapshots.
    #[arg(long, default_value = "data/raw")]
    data_dir: PathBuf,

    /// Directory receiving the processed CSV exports.
    #[arg(long, default_value = "data/processed")]
    output_dir: PathBuf,

    /// SQLite database file.
    #[arg(long, default_value = "employee_analytics.db")]
    database: PathBuf,

    /// Directory receiving the summary report.
    #[arg(long, default_value = "reports")]
    report_dir: PathBuf,

    /// Run date (YYYY-MM-DD) for tenure/duration/active-project derivations.
    /// Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Abort the run if validation finds any issue instead of logging and
    /// continuing.
    #[arg(long)]
    halt_on_issues: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig {
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
        database_path: cli.database,
        report_dir: cli.report_dir,
        as_of: cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive()),
        halt_on_issues: cli.halt_on_issues,
    };

    match Pipeline::new(config).run().context("pipeline crashed") {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
