//! Generic, entity-agnostic quality checks.

use crate::model::Tabular;
use crate::types::Value;

use super::{CheckKind, Issue};

/// Completeness: the primary key must be non-null and unique, and every
/// required column must exist and be fully populated.
pub fn check_completeness<T: Tabular>(
    rows: &[T],
    table: &str,
    primary_key: &str,
    required: &[&str],
) -> Vec<Issue> {
    let mut issues = Vec::new();
    let schema = T::table_schema();

    if schema.index_of(primary_key).is_some() {
        if rows
            .iter()
            .any(|r| r.value(primary_key) == Some(Value::Null))
        {
            issues.push(Issue::new(
                table,
                CheckKind::Completeness,
                format!("NULL values in primary key '{primary_key}'"),
            ));
        }
        let mut seen: Vec<Value> = Vec::with_capacity(rows.len());
        let mut duplicated = false;
        for r in rows {
            if let Some(v) = r.value(primary_key) {
                if v.is_null() {
                    continue;
                }
                if seen.contains(&v) {
                    duplicated = true;
                    break;
                }
                seen.push(v);
            }
        }
        if duplicated {
            issues.push(Issue::new(
                table,
                CheckKind::Completeness,
                format!("DUPLICATE values in primary key '{primary_key}'"),
            ));
        }
    }

    for col in required {
        if schema.index_of(col).is_none() {
            issues.push(Issue::new(
                table,
                CheckKind::Completeness,
                format!("missing required column '{col}'"),
            ));
        } else if rows.iter().any(|r| r.value(col) == Some(Value::Null)) {
            issues.push(Issue::new(
                table,
                CheckKind::Completeness,
                format!("NULL values in required column '{col}'"),
            ));
        }
    }

    issues
}

/// Referential consistency: every present foreign-key value in the child rows
/// must exist among the parent's keys. Absent (null) foreign keys are excluded
/// from the check.
pub fn check_consistency<C: Tabular, P: Tabular>(
    child: &[C],
    foreign_key: &str,
    parent: &[P],
    parent_key: &str,
    table: &str,
    parent_table: &str,
) -> Vec<Issue> {
    if C::table_schema().index_of(foreign_key).is_none()
        || P::table_schema().index_of(parent_key).is_none()
    {
        return Vec::new();
    }

    let parent_keys: Vec<Value> = distinct_non_null(parent, parent_key);
    let child_keys: Vec<Value> = distinct_non_null(child, foreign_key);

    let invalid = child_keys
        .iter()
        .filter(|k| !parent_keys.contains(k))
        .count();

    if invalid > 0 {
        vec![Issue::new(
            table,
            CheckKind::Consistency,
            format!("{invalid} {foreign_key} value(s) do not exist in {parent_table}"),
        )]
    } else {
        Vec::new()
    }
}

/// Accuracy: every row must satisfy `predicate`; failures are reported with
/// their count and the check description.
pub fn check_accuracy<T>(
    rows: &[T],
    table: &str,
    description: &str,
    predicate: impl Fn(&T) -> bool,
) -> Vec<Issue> {
    let failed = rows.iter().filter(|r| !predicate(r)).count();
    if failed > 0 {
        vec![Issue::new(
            table,
            CheckKind::Accuracy,
            format!("{failed} row(s) failed check: {description}"),
        )]
    } else {
        Vec::new()
    }
}

fn distinct_non_null<T: Tabular>(rows: &[T], column: &str) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for r in rows {
        if let Some(v) = r.value(column) {
            if !v.is_null() && !out.contains(&v) {
                out.push(v);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{check_accuracy, check_completeness, check_consistency};
    use crate::model::{Department, Employee, SalaryBucket};
    use crate::validation::CheckKind;
    use chrono::NaiveDate;

    fn employee(id: Option<i64>, name: Option<&str>, dept: Option<i64>) -> Employee {
        Employee {
            employee_id: id,
            name: name.map(str::to_owned),
            department_id: dept,
            salary: Some(60_000.0),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            manager_id: None,
            bonus_eligible: Some(true),
            status: Some("active".to_string()),
            tenure_years: Some(4.5),
            salary_bucket: Some(SalaryBucket::Medium),
        }
    }

    fn department(id: i64) -> Department {
        Department {
            department_id: Some(id),
            name: Some("Engineering".to_string()),
            location: None,
            budget: None,
            manager_id: None,
        }
    }

    #[test]
    fn completeness_flags_null_and_duplicate_primary_keys() {
        let rows = vec![
            employee(Some(1), Some("a"), None),
            employee(Some(1), Some("b"), None),
            employee(None, Some("c"), None),
        ];
        let issues = check_completeness(&rows, "Employees", "employee_id", &[]);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.kind == CheckKind::Completeness));
    }

    #[test]
    fn completeness_flags_null_required_columns() {
        let rows = vec![employee(Some(1), None, None)];
        let issues = check_completeness(&rows, "Employees", "employee_id", &["name"]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].detail.contains("name"));
    }

    #[test]
    fn completeness_flags_columns_missing_from_the_schema() {
        let rows = vec![employee(Some(1), Some("a"), None)];
        let issues = check_completeness(&rows, "Employees", "employee_id", &["shoe_size"]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].detail.contains("missing required column"));
    }

    #[test]
    fn consistency_counts_distinct_invalid_foreign_keys() {
        let employees = vec![
            employee(Some(1), Some("a"), Some(101)),
            employee(Some(2), Some("b"), Some(999)),
            employee(Some(3), Some("c"), Some(999)),
        ];
        let departments = vec![department(101)];
        let issues = check_consistency(
            &employees,
            "department_id",
            &departments,
            "department_id",
            "Employees",
            "Departments",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, CheckKind::Consistency);
        assert!(issues[0].detail.starts_with("1 "));
        assert!(issues[0].detail.contains("Departments"));
    }

    #[test]
    fn consistency_excludes_absent_foreign_keys() {
        let employees = vec![employee(Some(1), Some("a"), None)];
        let departments = vec![department(101)];
        let issues = check_consistency(
            &employees,
            "department_id",
            &departments,
            "department_id",
            "Employees",
            "Departments",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn accuracy_reports_failing_row_count() {
        let rows = vec![
            employee(Some(1), Some("a"), None),
            employee(Some(2), Some("b"), None),
        ];
        let issues = check_accuracy(&rows, "Employees", "id must be under 2", |e| {
            e.employee_id.is_some_and(|id| id < 2)
        });
        assert_eq!(issues.len(), 1);
        assert!(issues[0].detail.contains("1 row(s)"));
        let clean = check_accuracy(&rows, "Employees", "id must be positive", |e| {
            e.employee_id.is_some_and(|id| id > 0)
        });
        assert!(clean.is_empty());
    }
}
