//! Department rollup: employee headcount/salary and active-project stats.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::cleaning::round2;
use crate::model::{Department, DepartmentSummary, Employee, Project};

/// Build one summary row per department.
///
/// A project counts as active when it has no `end_date` or its `end_date` is
/// strictly after `as_of`. Departments with no matching employees or projects
/// zero-fill their counts and budget; `avg_salary` stays absent instead.
pub fn department_summary(
    departments: &[Department],
    employees: &[Employee],
    projects: &[Project],
    as_of: NaiveDate,
) -> Vec<DepartmentSummary> {
    struct EmployeeStats {
        headcount: i64,
        salary_sum: f64,
        salary_count: usize,
    }
    let mut emp_stats: HashMap<i64, EmployeeStats> = HashMap::new();
    for e in employees {
        let Some(dept_id) = e.department_id else {
            continue;
        };
        let entry = emp_stats.entry(dept_id).or_insert(EmployeeStats {
            headcount: 0,
            salary_sum: 0.0,
            salary_count: 0,
        });
        if e.employee_id.is_some() {
            entry.headcount += 1;
        }
        if let Some(s) = e.salary {
            entry.salary_sum += s;
            entry.salary_count += 1;
        }
    }

    struct ProjectStats {
        active: i64,
        budget_sum: f64,
    }
    let mut proj_stats: HashMap<i64, ProjectStats> = HashMap::new();
    for p in projects {
        let Some(dept_id) = p.department_id else {
            continue;
        };
        let is_active = p.end_date.is_none_or(|e| e > as_of);
        if !is_active {
            continue;
        }
        let entry = proj_stats.entry(dept_id).or_insert(ProjectStats {
            active: 0,
            budget_sum: 0.0,
        });
        if p.project_id.is_some() {
            entry.active += 1;
        }
        if let Some(b) = p.budget {
            entry.budget_sum += b;
        }
    }

    departments
        .iter()
        .map(|d| {
            let emp = d.department_id.and_then(|id| emp_stats.get(&id));
            let proj = d.department_id.and_then(|id| proj_stats.get(&id));
            DepartmentSummary {
                department_id: d.department_id,
                department_name: d.name.clone(),
                total_employees: emp.map_or(0, |s| s.headcount),
                avg_salary: emp.and_then(|s| {
                    (s.salary_count > 0).then(|| round2(s.salary_sum / s.salary_count as f64))
                }),
                active_projects: proj.map_or(0, |s| s.active),
                total_budget: proj.map_or(0.0, |s| s.budget_sum),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::department_summary;
    use crate::model::{Department, Employee, Project, SalaryBucket};
    use chrono::NaiveDate;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn department(id: i64, name: &str) -> Department {
        Department {
            department_id: Some(id),
            name: Some(name.to_string()),
            location: None,
            budget: None,
            manager_id: None,
        }
    }

    fn employee(id: i64, dept: i64, salary: f64) -> Employee {
        Employee {
            employee_id: Some(id),
            name: Some(format!("Employee {id}")),
            department_id: Some(dept),
            salary: Some(salary),
            hire_date: NaiveDate::from_ymd_opt(2020, 1, 1),
            manager_id: None,
            bonus_eligible: Some(true),
            status: Some("active".to_string()),
            tenure_years: Some(4.5),
            salary_bucket: Some(SalaryBucket::from_salary(salary)),
        }
    }

    fn project(id: i64, dept: i64, end: Option<NaiveDate>, budget: f64) -> Project {
        Project {
            project_id: Some(id),
            project_name: Some(format!("Project {id}")),
            department_id: Some(dept),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            end_date: end,
            budget: Some(budget),
            status: None,
            duration_days: Some(100),
            daily_budget_alloc: 0.0,
        }
    }

    #[test]
    fn averages_and_counts_group_by_department() {
        let summary = department_summary(
            &[department(101, "Engineering"), department(102, "Sales")],
            &[
                employee(1, 101, 40_000.0),
                employee(2, 101, 60_000.0),
                employee(3, 102, 90_000.0),
            ],
            &[
                project(1, 101, None, 500_000.0),
                project(2, 101, NaiveDate::from_ymd_opt(2023, 6, 30), 100_000.0),
            ],
            as_of(),
        );

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].total_employees, 2);
        assert_eq!(summary[0].avg_salary, Some(50_000.0));
        assert_eq!(summary[0].active_projects, 1);
        assert_eq!(summary[0].total_budget, 500_000.0);
        assert_eq!(summary[1].total_employees, 1);
    }

    #[test]
    fn department_with_no_matches_zero_fills() {
        let summary = department_summary(&[department(105, "Operations")], &[], &[], as_of());
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total_employees, 0);
        assert_eq!(summary[0].avg_salary, None);
        assert_eq!(summary[0].active_projects, 0);
        assert_eq!(summary[0].total_budget, 0.0);
    }

    #[test]
    fn end_date_equal_to_run_date_is_not_active() {
        let summary = department_summary(
            &[department(101, "Engineering")],
            &[],
            &[project(1, 101, Some(as_of()), 100_000.0)],
            as_of(),
        );
        assert_eq!(summary[0].active_projects, 0);
    }
}
