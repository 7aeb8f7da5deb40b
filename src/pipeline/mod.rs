//! Pipeline orchestration: Extract → Transform → Validate → Load.
//!
//! Each phase runs to completion before the next starts and is gated on the
//! previous phase's structural success, never on validation findings. The
//! orchestrator owns the policy decisions: a missing source or a storage
//! failure aborts the run, while data-quality issues downgrade to logged
//! warnings unless [`PipelineConfig::halt_on_issues`] is set.
//!
//! The run date enters once, as [`PipelineConfig::as_of`], and flows into
//! every date-dependent derivation so a rerun over the same snapshot is
//! deterministic.

pub mod report;

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::aggregation::{department_summary, employee_performance, project_workload};
use crate::cleaning::{
    clean_assignments, clean_departments, clean_employees, clean_projects, clean_reviews,
};
use crate::error::{EtlError, EtlResult};
use crate::ingestion::{SourceTable, read_table, verify_sources};
use crate::load::{Store, export_row_set};
use crate::model::{
    Assignment, Department, DepartmentSummary, Employee, EmployeePerformance, Project,
    ProjectWorkload, Review, to_row_set,
};
use crate::types::RowSet;
use crate::validation::{
    validate_assignments, validate_employees, validate_projects, validate_reviews,
};

use report::{PhaseTiming, QualityStats, RunSummary, TableVolume};

/// Names of the tables handed to the flat-file and relational sinks.
pub const OUTPUT_TABLES: [&str; 6] = [
    "dim_departments",
    "dim_employees",
    "fact_performance_reviews",
    "fact_project_assignments",
    "summary_dept_metrics",
    "summary_emp_performance",
];

/// Run configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the five raw CSV snapshots.
    pub data_dir: PathBuf,
    /// Directory receiving the processed CSV exports.
    pub output_dir: PathBuf,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Directory receiving the text report and its JSON copy.
    pub report_dir: PathBuf,
    /// The run date used for tenure, project duration, and active-project
    /// status.
    pub as_of: NaiveDate,
    /// When set, validation issues abort the run before Load.
    pub halt_on_issues: bool,
}

/// Raw row sets straight from the source reader.
struct RawTables {
    departments: RowSet,
    employees: RowSet,
    reviews: RowSet,
    projects: RowSet,
    assignments: RowSet,
}

/// Everything the Transform phase produces.
///
/// `project_workload` is built by the engine and exposed to callers; it is not
/// part of the fixed load set.
pub struct TransformedData {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub reviews: Vec<Review>,
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
    pub dept_summary: Vec<DepartmentSummary>,
    pub emp_performance: Vec<EmployeePerformance>,
    pub project_workload: Vec<ProjectWorkload>,
}

impl TransformedData {
    /// The six boundary row sets, in load order, with their fixed output
    /// column projections applied.
    pub fn output_tables(&self) -> Vec<(&'static str, RowSet)> {
        vec![
            (
                "dim_departments",
                to_row_set(&self.departments).select(&["department_id", "name"]),
            ),
            (
                "dim_employees",
                to_row_set(&self.employees).select(&[
                    "employee_id",
                    "name",
                    "department_id",
                    "salary",
                    "hire_date",
                    "status",
                    "bonus_eligible",
                    "tenure_years",
                    "salary_bucket",
                ]),
            ),
            (
                "fact_performance_reviews",
                to_row_set(&self.reviews).select(&[
                    "review_id",
                    "employee_id",
                    "review_date",
                    "rating",
                    "reviewer_id",
                    "performance_category",
                    "latest_rating",
                    "is_self_review",
                ]),
            ),
            (
                "fact_project_assignments",
                to_row_set(&self.assignments).select(&[
                    "employee_id",
                    "project_id",
                    "allocation_percentage",
                    "start_date",
                    "end_date",
                ]),
            ),
            ("summary_dept_metrics", to_row_set(&self.dept_summary)),
            ("summary_emp_performance", to_row_set(&self.emp_performance)),
        ]
    }
}

/// The batch pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Execute a full run and return its summary.
    ///
    /// Fails on structural problems only (missing sources, an entirely
    /// unparsable required column, storage errors), or on validation findings
    /// when [`PipelineConfig::halt_on_issues`] is set.
    pub fn run(&self) -> EtlResult<RunSummary> {
        let run_start = Instant::now();
        let started_at = timestamp();
        let mut phases: Vec<PhaseTiming> = Vec::new();
        info!("=== ETL PIPELINE STARTED ===");

        let phase_start = Instant::now();
        info!(">>> PHASE 1: EXTRACTION STARTED");
        let raw = self.extract()?;
        let mut volumes = extracted_volumes(&raw);
        phases.push(timing("Extraction", phase_start));

        let phase_start = Instant::now();
        info!(">>> PHASE 2: TRANSFORMATION STARTED");
        let data = self.transform(&raw)?;
        record_cleaned_counts(&mut volumes, &data);
        phases.push(timing("Transformation", phase_start));

        let phase_start = Instant::now();
        info!(">>> PHASE 3: VALIDATION STARTED");
        let quality = self.validate(&data)?;
        phases.push(timing("Validation", phase_start));

        let phase_start = Instant::now();
        info!(">>> PHASE 4: LOADING STARTED");
        self.load(&data)?;
        phases.push(timing("Loading", phase_start));

        let insights = report::compute_insights(
            &data.dept_summary,
            &data.emp_performance,
            &data.employees,
            &data.projects,
        );
        let summary = RunSummary {
            started_at,
            finished_at: timestamp(),
            total_seconds: run_start.elapsed().as_secs_f64(),
            phases,
            volumes,
            quality,
            insights,
        };
        self.write_reports(&summary)?;

        info!("=== ETL PIPELINE COMPLETED ===");
        Ok(summary)
    }

    fn extract(&self) -> EtlResult<RawTables> {
        verify_sources(&self.config.data_dir)?;
        let dir = &self.config.data_dir;
        let raw = RawTables {
            departments: read_table(dir, SourceTable::Departments)?,
            employees: read_table(dir, SourceTable::Employees)?,
            reviews: read_table(dir, SourceTable::PerformanceReviews)?,
            projects: read_table(dir, SourceTable::Projects)?,
            assignments: read_table(dir, SourceTable::ProjectAssignments)?,
        };
        for table in SourceTable::ALL {
            let rows = match table {
                SourceTable::Departments => raw.departments.row_count(),
                SourceTable::Employees => raw.employees.row_count(),
                SourceTable::PerformanceReviews => raw.reviews.row_count(),
                SourceTable::Projects => raw.projects.row_count(),
                SourceTable::ProjectAssignments => raw.assignments.row_count(),
            };
            info!(table = table.name(), rows, "extracted");
        }
        Ok(raw)
    }

    /// Cleaners first, then aggregators in dependency order: the department
    /// dimension feeds both summaries, employees feed the review- and
    /// assignment-based aggregates.
    fn transform(&self, raw: &RawTables) -> EtlResult<TransformedData> {
        let as_of = self.config.as_of;
        let departments = clean_departments(&raw.departments);
        let employees = clean_employees(&raw.employees, as_of)?;
        let reviews = clean_reviews(&raw.reviews);
        let projects = clean_projects(&raw.projects, as_of);
        let assignments = clean_assignments(&raw.assignments);

        let dept_summary = department_summary(&departments, &employees, &projects, as_of);
        let emp_performance = employee_performance(&employees, &reviews, &departments);
        let project_workload = project_workload(&projects, &assignments);

        Ok(TransformedData {
            departments,
            employees,
            reviews,
            projects,
            assignments,
            dept_summary,
            emp_performance,
            project_workload,
        })
    }

    fn validate(&self, data: &TransformedData) -> EtlResult<QualityStats> {
        let per_entity = [
            validate_employees(&data.employees, &data.departments),
            validate_reviews(&data.reviews, &data.employees),
            validate_assignments(&data.assignments, &data.projects, &data.employees),
            validate_projects(&data.projects),
        ];

        let passed = per_entity.iter().filter(|i| i.is_empty()).count();
        let issues: Vec<String> = per_entity
            .iter()
            .flatten()
            .map(ToString::to_string)
            .collect();

        if issues.is_empty() {
            info!("validation passed");
        } else {
            warn!(count = issues.len(), "validation found issues");
            for issue in &issues {
                warn!("  - {issue}");
            }
            if self.config.halt_on_issues {
                return Err(EtlError::ValidationFailed { issues });
            }
        }

        Ok(QualityStats {
            total_checks: per_entity.len(),
            passed,
            failed: issues.len(),
            issues,
        })
    }

    /// Export every boundary table to CSV and load it into the store, then
    /// build the fixed index set. The store connection lives exactly as long
    /// as this phase.
    fn load(&self, data: &TransformedData) -> EtlResult<()> {
        std::fs::create_dir_all(&self.config.output_dir)?;
        let mut store = Store::open(&self.config.database_path)?;

        for (name, row_set) in data.output_tables() {
            export_row_set(&row_set, self.config.output_dir.join(format!("{name}.csv")))?;
            let inserted = store.replace_table(&row_set, name)?;
            info!(table = name, rows = inserted, "loaded");
        }

        store.create_index("dim_employees", "department_id")?;
        store.create_index("fact_performance_reviews", "employee_id")?;
        store.create_index("fact_project_assignments", "employee_id")?;
        store.create_index("fact_project_assignments", "project_id")?;
        Ok(())
    }

    fn write_reports(&self, summary: &RunSummary) -> EtlResult<()> {
        std::fs::create_dir_all(&self.config.report_dir)?;
        let text_path = self.config.report_dir.join("etl_summary_report.txt");
        report::write_report(summary, &text_path)?;
        report::write_json_summary(summary, self.config.report_dir.join("etl_summary.json"))?;
        info!(path = %text_path.display(), "summary report written");
        Ok(())
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn timing(phase: &str, start: Instant) -> PhaseTiming {
    let seconds = start.elapsed().as_secs_f64();
    info!(phase, seconds, "phase completed");
    PhaseTiming {
        phase: phase.to_string(),
        seconds,
    }
}

fn extracted_volumes(raw: &RawTables) -> Vec<TableVolume> {
    let volume = |table: SourceTable, rows: &RowSet| TableVolume {
        table: table.name().to_string(),
        extracted: rows.row_count(),
        cleaned: 0,
    };
    vec![
        volume(SourceTable::Departments, &raw.departments),
        volume(SourceTable::Employees, &raw.employees),
        volume(SourceTable::PerformanceReviews, &raw.reviews),
        volume(SourceTable::Projects, &raw.projects),
        volume(SourceTable::ProjectAssignments, &raw.assignments),
    ]
}

fn record_cleaned_counts(volumes: &mut [TableVolume], data: &TransformedData) {
    for v in volumes.iter_mut() {
        v.cleaned = match v.table.as_str() {
            "departments" => data.departments.len(),
            "employees" => data.employees.len(),
            "performance_reviews" => data.reviews.len(),
            "projects" => data.projects.len(),
            "project_assignments" => data.assignments.len(),
            _ => v.cleaned,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{OUTPUT_TABLES, TransformedData};

    #[test]
    fn boundary_tables_match_the_fixed_output_set() {
        let data = TransformedData {
            departments: Vec::new(),
            employees: Vec::new(),
            reviews: Vec::new(),
            projects: Vec::new(),
            assignments: Vec::new(),
            dept_summary: Vec::new(),
            emp_performance: Vec::new(),
            project_workload: Vec::new(),
        };
        let names: Vec<&str> = data.output_tables().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, OUTPUT_TABLES);
    }

    #[test]
    fn dim_employees_projection_drops_manager_id() {
        let data = TransformedData {
            departments: Vec::new(),
            employees: Vec::new(),
            reviews: Vec::new(),
            projects: Vec::new(),
            assignments: Vec::new(),
            dept_summary: Vec::new(),
            emp_performance: Vec::new(),
            project_workload: Vec::new(),
        };
        let tables = data.output_tables();
        let (_, dim_employees) = tables.iter().find(|(n, _)| *n == "dim_employees").unwrap();
        assert!(dim_employees.schema.index_of("manager_id").is_none());
        assert_eq!(dim_employees.schema.fields.len(), 9);
    }
}
