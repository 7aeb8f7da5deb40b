//! Per-employee review rollup with the department name joined on.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::cleaning::round2;
use crate::model::{Department, Employee, EmployeePerformance, Review};

/// Build one summary row per clean employee.
///
/// The department name joins on `department_id`; an employee with no
/// department, or whose department is absent from the departments table, gets
/// `"Unknown"`. Review stats group by `employee_id` in date order:
/// `latest_rating` is the rating of the last review by date, not the best one.
/// Employees without reviews keep `review_count = 0` and absent rating fields.
pub fn employee_performance(
    employees: &[Employee],
    reviews: &[Review],
    departments: &[Department],
) -> Vec<EmployeePerformance> {
    let dept_names: HashMap<i64, &str> = departments
        .iter()
        .filter_map(|d| Some((d.department_id?, d.name.as_deref()?)))
        .collect();

    struct ReviewStats {
        rating_sum: f64,
        count: i64,
        last_rating: Option<f64>,
        max_date: Option<NaiveDate>,
    }
    let mut by_date: Vec<&Review> = reviews.iter().collect();
    by_date.sort_by_key(|r| r.review_date);

    let mut stats: HashMap<i64, ReviewStats> = HashMap::new();
    for r in by_date {
        let Some(eid) = r.employee_id else { continue };
        let entry = stats.entry(eid).or_insert(ReviewStats {
            rating_sum: 0.0,
            count: 0,
            last_rating: None,
            max_date: None,
        });
        if let Some(rating) = r.rating {
            entry.rating_sum += rating;
            entry.count += 1;
            entry.last_rating = Some(rating);
        }
        if let Some(d) = r.review_date {
            entry.max_date = Some(entry.max_date.map_or(d, |m| m.max(d)));
        }
    }

    employees
        .iter()
        .map(|e| {
            let s = e.employee_id.and_then(|id| stats.get(&id));
            EmployeePerformance {
                employee_id: e.employee_id,
                name: e.name.clone(),
                department_name: e
                    .department_id
                    .and_then(|id| dept_names.get(&id))
                    .map_or_else(|| "Unknown".to_string(), |n| (*n).to_string()),
                avg_rating: s.and_then(|s| {
                    (s.count > 0).then(|| round2(s.rating_sum / s.count as f64))
                }),
                review_count: s.map_or(0, |s| s.count),
                latest_rating: s.and_then(|s| s.last_rating),
                latest_review_date: s.and_then(|s| s.max_date),
            }
        })
        .collect()
}
