//! Extract-phase collaborators: the fixed source-table registry and readers.
//!
//! Every run reads the same five CSV snapshots from a data directory. Each table
//! has a fixed raw schema; date columns arrive as text and are parsed later by
//! the cleaners (a malformed date cell becomes null there, not a read failure).
//!
//! [`verify_sources`] is the structural gate for the Extract phase: a missing
//! file aborts the run before any table is read.

pub mod csv;

use std::path::{Path, PathBuf};

use crate::error::{EtlError, EtlResult};
use crate::types::{DataType, Field, RowSet, Schema};

pub use self::csv::{read_csv_from_path, read_csv_from_reader};

/// The five required source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTable {
    Departments,
    Employees,
    PerformanceReviews,
    Projects,
    ProjectAssignments,
}

impl SourceTable {
    /// All source tables, in extraction order.
    pub const ALL: [SourceTable; 5] = [
        SourceTable::Departments,
        SourceTable::Employees,
        SourceTable::PerformanceReviews,
        SourceTable::Projects,
        SourceTable::ProjectAssignments,
    ];

    /// Table name, which is also the file stem of the CSV snapshot.
    pub fn name(&self) -> &'static str {
        match self {
            SourceTable::Departments => "departments",
            SourceTable::Employees => "employees",
            SourceTable::PerformanceReviews => "performance_reviews",
            SourceTable::Projects => "projects",
            SourceTable::ProjectAssignments => "project_assignments",
        }
    }

    /// Path of this table's CSV snapshot under `dir`.
    pub fn path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.csv", self.name()))
    }

    /// Raw schema of the source feed.
    ///
    /// Identifier columns are integers, money and ratings are floats, and date
    /// columns are plain text until the cleaners parse them.
    pub fn schema(&self) -> Schema {
        match self {
            SourceTable::Departments => Schema::new(vec![
                Field::new("department_id", DataType::Int64),
                Field::new("department_name", DataType::Utf8),
                Field::new("location", DataType::Utf8),
                Field::new("budget", DataType::Float64),
                Field::new("manager_id", DataType::Int64),
            ]),
            SourceTable::Employees => Schema::new(vec![
                Field::new("employee_id", DataType::Int64),
                Field::new("name", DataType::Utf8),
                Field::new("department_id", DataType::Int64),
                Field::new("salary", DataType::Float64),
                Field::new("hire_date", DataType::Utf8),
                Field::new("manager_id", DataType::Int64),
                Field::new("bonus_eligible", DataType::Utf8),
                Field::new("status", DataType::Utf8),
            ]),
            SourceTable::PerformanceReviews => Schema::new(vec![
                Field::new("review_id", DataType::Int64),
                Field::new("employee_id", DataType::Int64),
                Field::new("review_date", DataType::Utf8),
                Field::new("rating", DataType::Float64),
                Field::new("reviewer_id", DataType::Int64),
            ]),
            SourceTable::Projects => Schema::new(vec![
                Field::new("project_id", DataType::Int64),
                Field::new("project_name", DataType::Utf8),
                Field::new("department_id", DataType::Int64),
                Field::new("start_date", DataType::Utf8),
                Field::new("end_date", DataType::Utf8),
                Field::new("budget", DataType::Float64),
                Field::new("status", DataType::Utf8),
            ]),
            SourceTable::ProjectAssignments => Schema::new(vec![
                Field::new("assignment_id", DataType::Int64),
                Field::new("employee_id", DataType::Int64),
                Field::new("project_id", DataType::Int64),
                Field::new("role", DataType::Utf8),
                Field::new("allocation_percentage", DataType::Float64),
                Field::new("start_date", DataType::Utf8),
                Field::new("end_date", DataType::Utf8),
            ]),
        }
    }
}

/// Verify that every required source file exists under `dir`.
///
/// Returns [`EtlError::MissingSources`] listing every absent path, so the
/// operator sees the whole problem at once.
pub fn verify_sources(dir: &Path) -> EtlResult<()> {
    let missing: Vec<PathBuf> = SourceTable::ALL
        .iter()
        .map(|t| t.path(dir))
        .filter(|p| !p.exists())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EtlError::MissingSources { paths: missing })
    }
}

/// Read one source table from `dir` into a raw [`RowSet`].
pub fn read_table(dir: &Path, table: SourceTable) -> EtlResult<RowSet> {
    read_csv_from_path(table.path(dir), &table.schema())
}

#[cfg(test)]
mod tests {
    use super::{SourceTable, verify_sources};
    use crate::error::EtlError;

    #[test]
    fn table_names_match_the_feed() {
        let names: Vec<&str> = SourceTable::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "departments",
                "employees",
                "performance_reviews",
                "projects",
                "project_assignments"
            ]
        );
    }

    #[test]
    fn verify_sources_reports_every_missing_file() {
        let dir = std::env::temp_dir().join("employee-etl-does-not-exist");
        let err = verify_sources(&dir).unwrap_err();
        match err {
            EtlError::MissingSources { paths } => assert_eq!(paths.len(), 5),
            other => panic!("expected MissingSources, got {other}"),
        }
    }
}
