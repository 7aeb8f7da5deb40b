//! Project-assignment cleaning.

use crate::model::Assignment;
use crate::types::{RowSet, Value};

use super::{cell, date_cell};

/// Clean the raw project-assignments table.
///
/// Rows with `allocation_percentage > 100` are dropped, as are rows whose
/// dates are both present with `start_date > end_date`. An open-ended
/// assignment (no `end_date`) is kept.
pub fn clean_assignments(raw: &RowSet) -> Vec<Assignment> {
    let schema = &raw.schema;
    let id_idx = schema.index_of("assignment_id");
    let emp_idx = schema.index_of("employee_id");
    let proj_idx = schema.index_of("project_id");
    let role_idx = schema.index_of("role");
    let alloc_idx = schema.index_of("allocation_percentage");
    let start_idx = schema.index_of("start_date");
    let end_idx = schema.index_of("end_date");

    let mut out = Vec::with_capacity(raw.row_count());
    for row in &raw.rows {
        let allocation = cell(row, alloc_idx).and_then(Value::as_f64);
        if matches!(allocation, Some(a) if a > 100.0) {
            continue;
        }

        let start_date = date_cell(row, start_idx);
        let end_date = date_cell(row, end_idx);
        if let (Some(s), Some(e)) = (start_date, end_date) {
            if s > e {
                continue;
            }
        }

        out.push(Assignment {
            assignment_id: cell(row, id_idx).and_then(Value::as_i64),
            employee_id: cell(row, emp_idx).and_then(Value::as_i64),
            project_id: cell(row, proj_idx).and_then(Value::as_i64),
            role: cell(row, role_idx)
                .and_then(Value::as_str)
                .map(str::to_owned),
            allocation_percentage: allocation,
            start_date,
            end_date,
        });
    }
    out
}
