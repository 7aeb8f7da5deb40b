//! Project cleaning and feature derivation.

use chrono::NaiveDate;

use crate::model::Project;
use crate::types::{RowSet, Value};

use super::{cell, date_cell, round2};

/// Clean the raw projects table.
///
/// Rows with a missing or non-positive budget are dropped. Duration is the day
/// count from `start_date` to `end_date`, with `as_of` standing in for a
/// missing `end_date` (an ongoing project). The daily budget allocation is
/// `budget / duration` rounded to 2 decimals, or `0` when the duration is not
/// positive.
pub fn clean_projects(raw: &RowSet, as_of: NaiveDate) -> Vec<Project> {
    let schema = &raw.schema;
    let id_idx = schema.index_of("project_id");
    let name_idx = schema.index_of("project_name");
    let dept_idx = schema.index_of("department_id");
    let start_idx = schema.index_of("start_date");
    let end_idx = schema.index_of("end_date");
    let budget_idx = schema.index_of("budget");
    let status_idx = schema.index_of("status");

    let mut out = Vec::with_capacity(raw.row_count());
    for row in &raw.rows {
        let budget = cell(row, budget_idx).and_then(Value::as_f64);
        if budget_idx.is_some() && !matches!(budget, Some(b) if b > 0.0) {
            continue;
        }

        let start_date = date_cell(row, start_idx);
        let end_date = date_cell(row, end_idx);
        let duration_days = start_date.map(|s| (end_date.unwrap_or(as_of) - s).num_days());
        let daily_budget_alloc = match (budget, duration_days) {
            (Some(b), Some(d)) if d > 0 => round2(b / d as f64),
            _ => 0.0,
        };

        out.push(Project {
            project_id: cell(row, id_idx).and_then(Value::as_i64),
            project_name: cell(row, name_idx)
                .and_then(Value::as_str)
                .map(str::to_owned),
            department_id: cell(row, dept_idx).and_then(Value::as_i64),
            start_date,
            end_date,
            budget,
            status: cell(row, status_idx)
                .and_then(Value::as_str)
                .map(str::to_owned),
            duration_days,
            daily_budget_alloc,
        });
    }
    out
}
