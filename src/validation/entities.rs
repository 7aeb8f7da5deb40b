//! Per-table validators composing the generic checks with bespoke rules.

use crate::model::{Assignment, Department, Employee, Project, Review};

use super::checks::{check_accuracy, check_completeness, check_consistency};
use super::{CheckKind, Issue};

/// Statuses an employee row is allowed to carry.
const VALID_STATUSES: [&str; 4] = ["active", "inactive", "terminated", "leave"];

/// Validate the cleaned employees table against the departments dimension.
pub fn validate_employees(employees: &[Employee], departments: &[Department]) -> Vec<Issue> {
    let mut issues = check_completeness(
        employees,
        "Employees",
        "employee_id",
        &["name", "salary", "hire_date"],
    );
    issues.extend(check_consistency(
        employees,
        "department_id",
        departments,
        "department_id",
        "Employees",
        "Departments",
    ));

    let invalid_status = employees
        .iter()
        .filter(|e| !matches!(e.status.as_deref(), Some(s) if VALID_STATUSES.contains(&s)))
        .count();
    if invalid_status > 0 {
        issues.push(Issue::new(
            "Employees",
            CheckKind::Validity,
            format!("{invalid_status} row(s) carry an invalid status value"),
        ));
    }

    issues.extend(check_accuracy(
        employees,
        "Employees",
        "active employees must have salary > 0",
        |e| {
            !(e.status.as_deref() == Some("active")
                && matches!(e.salary, Some(s) if s <= 0.0))
        },
    ));

    issues
}

/// Validate the cleaned reviews table against the employees dimension.
pub fn validate_reviews(reviews: &[Review], employees: &[Employee]) -> Vec<Issue> {
    let mut issues = check_completeness(
        reviews,
        "Reviews",
        "review_id",
        &["employee_id", "rating", "review_date"],
    );
    issues.extend(check_consistency(
        reviews,
        "employee_id",
        employees,
        "employee_id",
        "Reviews",
        "Employees",
    ));
    issues.extend(check_accuracy(
        reviews,
        "Reviews",
        "rating must be between 1.0 and 5.0",
        |r| matches!(r.rating, Some(x) if (1.0..=5.0).contains(&x)),
    ));
    issues
}

/// Validate the cleaned assignments table against projects and employees.
pub fn validate_assignments(
    assignments: &[Assignment],
    projects: &[Project],
    employees: &[Employee],
) -> Vec<Issue> {
    let mut issues = check_consistency(
        assignments,
        "project_id",
        projects,
        "project_id",
        "Assignments",
        "Projects",
    );
    issues.extend(check_consistency(
        assignments,
        "employee_id",
        employees,
        "employee_id",
        "Assignments",
        "Employees",
    ));
    issues.extend(check_accuracy(
        assignments,
        "Assignments",
        "allocation must be 0-100%",
        |a| matches!(a.allocation_percentage, Some(x) if (0.0..=100.0).contains(&x)),
    ));
    issues
}

/// Validate the cleaned projects table.
pub fn validate_projects(projects: &[Project]) -> Vec<Issue> {
    let mut issues = check_completeness(
        projects,
        "Projects",
        "project_id",
        &["project_name", "start_date"],
    );
    issues.extend(check_accuracy(
        projects,
        "Projects",
        "budget must be positive when present",
        |p| p.budget.is_none_or(|b| b > 0.0),
    ));
    issues
}
