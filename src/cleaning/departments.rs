//! Department cleaning.

use crate::model::Department;
use crate::types::{RowSet, Value};

use super::{cell, title_case};

/// Clean the raw departments table: title-case the name and drop exact
/// full-row duplicates. No rows are filtered otherwise.
///
/// The source feed names its name column `department_name`; a feed using plain
/// `name` is accepted too.
pub fn clean_departments(raw: &RowSet) -> Vec<Department> {
    let schema = &raw.schema;
    let id_idx = schema.index_of("department_id");
    let name_idx = schema
        .index_of("department_name")
        .or_else(|| schema.index_of("name"));
    let location_idx = schema.index_of("location");
    let budget_idx = schema.index_of("budget");
    let manager_idx = schema.index_of("manager_id");

    let mut out: Vec<Department> = Vec::with_capacity(raw.row_count());
    for row in &raw.rows {
        let dept = Department {
            department_id: cell(row, id_idx).and_then(Value::as_i64),
            name: cell(row, name_idx)
                .and_then(Value::as_str)
                .map(title_case),
            location: cell(row, location_idx)
                .and_then(Value::as_str)
                .map(str::to_owned),
            budget: cell(row, budget_idx).and_then(Value::as_f64),
            manager_id: cell(row, manager_idx).and_then(Value::as_i64),
        };
        if !out.contains(&dept) {
            out.push(dept);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::clean_departments;
    use crate::ingestion::SourceTable;
    use crate::types::{RowSet, Value};

    fn raw_row(id: i64, name: &str) -> Vec<Value> {
        vec![
            Value::Int64(id),
            Value::Utf8(name.to_string()),
            Value::Utf8("Bangalore".to_string()),
            Value::Float64(1_000_000.0),
            Value::Null,
        ]
    }

    #[test]
    fn title_cases_names_and_drops_exact_duplicates() {
        let raw = RowSet::new(
            SourceTable::Departments.schema(),
            vec![
                raw_row(101, "engineering"),
                raw_row(101, "engineering"),
                raw_row(102, "human resources"),
            ],
        );
        let out = clean_departments(&raw);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name.as_deref(), Some("Engineering"));
        assert_eq!(out[1].name.as_deref(), Some("Human Resources"));
    }
}
