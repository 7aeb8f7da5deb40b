//! `employee-etl` is a batch ETL pipeline for employee analytics. Each run ingests
//! five CSV snapshots (departments, employees, performance reviews, projects,
//! project assignments) into typed in-memory [`types::RowSet`]s, cleans and
//! enriches them into the typed records of [`model`], validates referential and
//! business-rule integrity, aggregates cross-table summaries, and loads the
//! results into processed CSV files and a SQLite store.
//!
//! The primary entrypoint is [`pipeline::Pipeline`], which sequences the four
//! phases (Extract → Transform → Validate → Load), times them, and assembles the
//! run report.
//!
//! ## Phases
//!
//! - **Extract**: all five sources must exist; a missing file aborts the run.
//! - **Transform**: pure cleaners and aggregators; rows excluded by a filter are
//!   counted, never errors.
//! - **Validate**: completeness/consistency/accuracy checks returning issue
//!   lists; by default issues log as warnings and the run continues.
//! - **Load**: CSV export plus truncate-and-insert into SQLite, then the fixed
//!   index set.
//!
//! The run date is injected ([`pipeline::PipelineConfig::as_of`]) so tenure,
//! project durations, and active-project status are reproducible across reruns.
//!
//! ## Quick example: run the pipeline
//!
//! ```no_run
//! use employee_etl::pipeline::{Pipeline, PipelineConfig};
//!
//! # fn main() -> Result<(), employee_etl::EtlError> {
//! let config = PipelineConfig {
//!     data_dir: "data/raw".into(),
//!     output_dir: "data/processed".into(),
//!     database_path: "employee_analytics.db".into(),
//!     report_dir: "reports".into(),
//!     as_of: chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     halt_on_issues: false,
//! };
//! let summary = Pipeline::new(config).run()?;
//! println!("loaded {} tables in {:.2}s", 6, summary.total_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: clean one table
//!
//! ```rust
//! use employee_etl::cleaning::clean_employees;
//! use employee_etl::ingestion::SourceTable;
//! use employee_etl::types::{RowSet, Value};
//!
//! let raw = RowSet::new(
//!     SourceTable::Employees.schema(),
//!     vec![vec![
//!         Value::Int64(1),
//!         Value::Utf8("Rajesh Kumar".to_string()),
//!         Value::Int64(101),
//!         Value::Float64(75_000.0),
//!         Value::Utf8("2021-03-15".to_string()),
//!         Value::Null,
//!         Value::Utf8("Y".to_string()),
//!         Value::Utf8("active".to_string()),
//!     ]],
//! );
//! let as_of = chrono::NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let employees = clean_employees(&raw, as_of).unwrap();
//! assert_eq!(employees[0].salary_bucket.unwrap().as_str(), "Medium");
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory row-set primitives
//! - [`model`]: typed entity records and the flat-table bridge
//! - [`ingestion`]: source-table registry and CSV readers
//! - [`cleaning`]: per-entity cleaners
//! - [`validation`]: generic checks and per-entity validators
//! - [`aggregation`]: the derived summary tables
//! - [`load`]: CSV export and the SQLite store
//! - [`pipeline`]: orchestration, timing, and reporting
//! - [`error`]: error types used across the pipeline

pub mod aggregation;
pub mod cleaning;
pub mod error;
pub mod ingestion;
pub mod load;
pub mod model;
pub mod pipeline;
pub mod types;
pub mod validation;

pub use error::{EtlError, EtlResult};
