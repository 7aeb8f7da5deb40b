//! Typed records for the five source entities and the three derived summaries.
//!
//! Cleaners turn raw [`RowSet`]s into vectors of these records; aggregators and
//! validators work on the typed form. The [`Tabular`] trait is the bridge back to
//! the flat-table world: it gives every entity a fixed output [`Schema`], a
//! record-to-row conversion, and by-name column access for the generic
//! data-quality checks.
//!
//! Nullable source columns are `Option` fields. A missing foreign key is `None`,
//! never a sentinel value; the consistency check skips absent keys explicitly.

use chrono::NaiveDate;

use crate::types::{DataType, Field, RowSet, Schema, Value};

/// Column-level access to a typed record.
///
/// Implementors declare their flat-table schema once; [`Tabular::to_row`] must
/// produce values in the same order. [`Tabular::value`] is what the generic
/// completeness/consistency/accuracy checks use to treat heterogeneous entities
/// uniformly.
pub trait Tabular {
    /// Ordered flat-table schema for this entity.
    fn table_schema() -> Schema;

    /// The record as one row of [`Value`]s, in [`Tabular::table_schema`] order.
    fn to_row(&self) -> Vec<Value>;

    /// Look up a single column by name. `None` means the column is not part of
    /// this entity's schema (as opposed to a present-but-null cell).
    fn value(&self, column: &str) -> Option<Value> {
        let idx = Self::table_schema().index_of(column)?;
        self.to_row().into_iter().nth(idx)
    }
}

/// Convert a slice of typed records into a flat [`RowSet`].
pub fn to_row_set<T: Tabular>(records: &[T]) -> RowSet {
    RowSet::new(
        T::table_schema(),
        records.iter().map(Tabular::to_row).collect(),
    )
}

/// Salary band derived from the raw salary figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBucket {
    Low,
    Medium,
    High,
}

impl SalaryBucket {
    /// Band thresholds: `< 50_000` is Low, `<= 80_000` is Medium, above is High.
    pub fn from_salary(salary: f64) -> Self {
        if salary < 50_000.0 {
            Self::Low
        } else if salary <= 80_000.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Fixed label used in flat tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Review quality band derived from the rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceCategory {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceCategory {
    /// Band thresholds: `>= 4.5` Excellent, `>= 3.5` Good, below Needs Improvement.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Excellent
        } else if rating >= 3.5 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    /// Fixed label used in flat tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// A department row after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub department_id: Option<i64>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub budget: Option<f64>,
    pub manager_id: Option<i64>,
}

impl Tabular for Department {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("department_id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("location", DataType::Utf8),
            Field::new("budget", DataType::Float64),
            Field::new("manager_id", DataType::Int64),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.department_id.into(),
            self.name.clone().into(),
            self.location.clone().into(),
            self.budget.into(),
            self.manager_id.into(),
        ]
    }
}

/// An employee row after cleaning: inactive and zero-salary rows are gone,
/// tenure and salary bucket are derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub employee_id: Option<i64>,
    pub name: Option<String>,
    pub department_id: Option<i64>,
    pub salary: Option<f64>,
    pub hire_date: Option<NaiveDate>,
    pub manager_id: Option<i64>,
    pub bonus_eligible: Option<bool>,
    pub status: Option<String>,
    pub tenure_years: Option<f64>,
    pub salary_bucket: Option<SalaryBucket>,
}

impl Tabular for Employee {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("employee_id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("department_id", DataType::Int64),
            Field::new("salary", DataType::Float64),
            Field::new("hire_date", DataType::Date),
            Field::new("manager_id", DataType::Int64),
            Field::new("status", DataType::Utf8),
            Field::new("bonus_eligible", DataType::Bool),
            Field::new("tenure_years", DataType::Float64),
            Field::new("salary_bucket", DataType::Utf8),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.employee_id.into(),
            self.name.clone().into(),
            self.department_id.into(),
            self.salary.into(),
            self.hire_date.into(),
            self.manager_id.into(),
            self.status.clone().into(),
            self.bonus_eligible.into(),
            self.tenure_years.into(),
            self.salary_bucket
                .map(|b| b.as_str().to_string())
                .into(),
        ]
    }
}

/// A performance review row after cleaning: deduplicated on
/// (`employee_id`, `review_date`), ratings confined to [1.0, 5.0].
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub review_date: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub reviewer_id: Option<i64>,
    pub is_self_review: bool,
    pub performance_category: Option<PerformanceCategory>,
    /// Rating of this employee's last review in date order (not the maximum).
    pub latest_rating: Option<f64>,
}

impl Tabular for Review {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("review_id", DataType::Int64),
            Field::new("employee_id", DataType::Int64),
            Field::new("review_date", DataType::Date),
            Field::new("rating", DataType::Float64),
            Field::new("reviewer_id", DataType::Int64),
            Field::new("performance_category", DataType::Utf8),
            Field::new("latest_rating", DataType::Float64),
            Field::new("is_self_review", DataType::Bool),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.review_id.into(),
            self.employee_id.into(),
            self.review_date.into(),
            self.rating.into(),
            self.reviewer_id.into(),
            self.performance_category
                .map(|c| c.as_str().to_string())
                .into(),
            self.latest_rating.into(),
            Value::Bool(self.is_self_review),
        ]
    }
}

/// A project row after cleaning: budget present and positive (when the source
/// carries a budget column at all), duration and daily budget allocation
/// derived against the injected run date.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub department_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: Option<String>,
    pub duration_days: Option<i64>,
    pub daily_budget_alloc: f64,
}

impl Tabular for Project {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("project_id", DataType::Int64),
            Field::new("project_name", DataType::Utf8),
            Field::new("department_id", DataType::Int64),
            Field::new("start_date", DataType::Date),
            Field::new("end_date", DataType::Date),
            Field::new("budget", DataType::Float64),
            Field::new("status", DataType::Utf8),
            Field::new("project_duration_days", DataType::Int64),
            Field::new("daily_budget_alloc", DataType::Float64),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.project_id.into(),
            self.project_name.clone().into(),
            self.department_id.into(),
            self.start_date.into(),
            self.end_date.into(),
            self.budget.into(),
            self.status.clone().into(),
            self.duration_days.into(),
            Value::Float64(self.daily_budget_alloc),
        ]
    }
}

/// A project assignment row after cleaning: allocation within range, date
/// interval sane.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub assignment_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub role: Option<String>,
    pub allocation_percentage: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Tabular for Assignment {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("assignment_id", DataType::Int64),
            Field::new("employee_id", DataType::Int64),
            Field::new("project_id", DataType::Int64),
            Field::new("role", DataType::Utf8),
            Field::new("allocation_percentage", DataType::Float64),
            Field::new("start_date", DataType::Date),
            Field::new("end_date", DataType::Date),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.assignment_id.into(),
            self.employee_id.into(),
            self.project_id.into(),
            self.role.clone().into(),
            self.allocation_percentage.into(),
            self.start_date.into(),
            self.end_date.into(),
        ]
    }
}

/// One row per department: employee and active-project rollups.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub total_employees: i64,
    pub avg_salary: Option<f64>,
    pub active_projects: i64,
    pub total_budget: f64,
}

impl Tabular for DepartmentSummary {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("department_id", DataType::Int64),
            Field::new("department_name", DataType::Utf8),
            Field::new("total_employees", DataType::Int64),
            Field::new("avg_salary", DataType::Float64),
            Field::new("active_projects", DataType::Int64),
            Field::new("total_budget", DataType::Float64),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.department_id.into(),
            self.department_name.clone().into(),
            Value::Int64(self.total_employees),
            self.avg_salary.into(),
            Value::Int64(self.active_projects),
            Value::Float64(self.total_budget),
        ]
    }
}

/// One row per clean employee: review rollups and department name.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeePerformance {
    pub employee_id: Option<i64>,
    pub name: Option<String>,
    /// `"Unknown"` when the employee has no department or the department is
    /// absent from the departments table.
    pub department_name: String,
    pub avg_rating: Option<f64>,
    pub review_count: i64,
    pub latest_rating: Option<f64>,
    pub latest_review_date: Option<NaiveDate>,
}

impl Tabular for EmployeePerformance {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("employee_id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("department_name", DataType::Utf8),
            Field::new("avg_rating", DataType::Float64),
            Field::new("review_count", DataType::Int64),
            Field::new("latest_rating", DataType::Float64),
            Field::new("latest_review_date", DataType::Date),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.employee_id.into(),
            self.name.clone().into(),
            Value::Utf8(self.department_name.clone()),
            self.avg_rating.into(),
            Value::Int64(self.review_count),
            self.latest_rating.into(),
            self.latest_review_date.into(),
        ]
    }
}

/// One row per project: assignment rollups.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWorkload {
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    /// Distinct employees assigned to the project.
    pub total_team_size: i64,
    pub total_allocation: f64,
    pub avg_allocation: f64,
}

impl Tabular for ProjectWorkload {
    fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("project_id", DataType::Int64),
            Field::new("project_name", DataType::Utf8),
            Field::new("total_team_size", DataType::Int64),
            Field::new("total_allocation", DataType::Float64),
            Field::new("avg_allocation", DataType::Float64),
        ])
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            self.project_id.into(),
            self.project_name.clone().into(),
            Value::Int64(self.total_team_size),
            Value::Float64(self.total_allocation),
            Value::Float64(self.avg_allocation),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{PerformanceCategory, SalaryBucket, Tabular};
    use crate::types::Value;

    #[test]
    fn salary_bucket_boundaries() {
        assert_eq!(SalaryBucket::from_salary(49_999.0), SalaryBucket::Low);
        assert_eq!(SalaryBucket::from_salary(50_000.0), SalaryBucket::Medium);
        assert_eq!(SalaryBucket::from_salary(80_000.0), SalaryBucket::Medium);
        assert_eq!(SalaryBucket::from_salary(80_001.0), SalaryBucket::High);
    }

    #[test]
    fn performance_category_thresholds() {
        assert_eq!(
            PerformanceCategory::from_rating(4.5),
            PerformanceCategory::Excellent
        );
        assert_eq!(
            PerformanceCategory::from_rating(3.5),
            PerformanceCategory::Good
        );
        assert_eq!(
            PerformanceCategory::from_rating(3.49),
            PerformanceCategory::NeedsImprovement
        );
    }

    #[test]
    fn tabular_value_distinguishes_missing_from_null() {
        let dept = super::Department {
            department_id: Some(101),
            name: None,
            location: None,
            budget: None,
            manager_id: None,
        };
        assert_eq!(dept.value("department_id"), Some(Value::Int64(101)));
        assert_eq!(dept.value("name"), Some(Value::Null));
        assert_eq!(dept.value("nonexistent"), None);
    }
}
