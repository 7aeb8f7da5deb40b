//! Employee cleaning and feature derivation.

use chrono::NaiveDate;

use crate::error::{EtlError, EtlResult};
use crate::model::{Employee, SalaryBucket};
use crate::types::{RowSet, Value};

use super::{cell, date_cell, round1};

/// Clean the raw employees table.
///
/// - drops rows with `status == "inactive"`
/// - drops rows with `salary == 0`
/// - parses `hire_date` (malformed cells become null)
/// - maps `bonus_eligible` `Y`/`N` to a boolean, anything else to null
/// - derives `tenure_years` against `as_of` and the salary bucket
///
/// Fails only when a present `hire_date` column yields no parsable value at
/// all; individual bad cells are tolerated.
pub fn clean_employees(raw: &RowSet, as_of: NaiveDate) -> EtlResult<Vec<Employee>> {
    let schema = &raw.schema;
    let id_idx = schema.index_of("employee_id");
    let name_idx = schema.index_of("name");
    let dept_idx = schema.index_of("department_id");
    let salary_idx = schema.index_of("salary");
    let hire_idx = schema.index_of("hire_date");
    let manager_idx = schema.index_of("manager_id");
    let bonus_idx = schema.index_of("bonus_eligible");
    let status_idx = schema.index_of("status");

    if hire_idx.is_some() {
        ensure_parsable_dates(raw, hire_idx, "employees", "hire_date")?;
    }

    let mut out = Vec::with_capacity(raw.row_count());
    for row in &raw.rows {
        if let Some(Value::Utf8(status)) = cell(row, status_idx) {
            if status == "inactive" {
                continue;
            }
        }
        let salary = cell(row, salary_idx).and_then(Value::as_f64);
        if salary == Some(0.0) {
            continue;
        }

        let hire_date = date_cell(row, hire_idx);
        let bonus_eligible = match cell(row, bonus_idx) {
            Some(Value::Utf8(s)) if s == "Y" => Some(true),
            Some(Value::Utf8(s)) if s == "N" => Some(false),
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        };

        out.push(Employee {
            employee_id: cell(row, id_idx).and_then(Value::as_i64),
            name: cell(row, name_idx)
                .and_then(Value::as_str)
                .map(str::to_owned),
            department_id: cell(row, dept_idx).and_then(Value::as_i64),
            salary,
            hire_date,
            manager_id: cell(row, manager_idx).and_then(Value::as_i64),
            bonus_eligible,
            status: cell(row, status_idx)
                .and_then(Value::as_str)
                .map(str::to_owned),
            tenure_years: hire_date.map(|d| round1((as_of - d).num_days() as f64 / 365.25)),
            salary_bucket: salary.map(SalaryBucket::from_salary),
        });
    }
    Ok(out)
}

/// A present date column with values but no parsable cell aborts the run.
fn ensure_parsable_dates(
    raw: &RowSet,
    idx: Option<usize>,
    table: &str,
    column: &str,
) -> EtlResult<()> {
    let mut non_null = 0usize;
    let mut parsed = 0usize;
    for row in &raw.rows {
        match cell(row, idx) {
            Some(v) if !v.is_null() => {
                non_null += 1;
                if date_cell(row, idx).is_some() {
                    parsed += 1;
                }
            }
            _ => {}
        }
    }
    if non_null > 0 && parsed == 0 {
        return Err(EtlError::UnparsableColumn {
            table: table.to_string(),
            column: column.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::clean_employees;
    use crate::error::EtlError;
    use crate::ingestion::SourceTable;
    use crate::model::SalaryBucket;
    use crate::types::{RowSet, Value};
    use chrono::NaiveDate;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn raw_row(
        id: i64,
        name: &str,
        dept: Option<i64>,
        salary: f64,
        hire_date: &str,
        status: &str,
    ) -> Vec<Value> {
        vec![
            Value::Int64(id),
            Value::Utf8(name.to_string()),
            dept.into(),
            Value::Float64(salary),
            Value::Utf8(hire_date.to_string()),
            Value::Null,
            Value::Utf8("Y".to_string()),
            Value::Utf8(status.to_string()),
        ]
    }

    fn raw_employees(rows: Vec<Vec<Value>>) -> RowSet {
        RowSet::new(SourceTable::Employees.schema(), rows)
    }

    #[test]
    fn drops_inactive_and_zero_salary_rows() {
        let raw = raw_employees(vec![
            raw_row(1, "Alice", Some(101), 40_000.0, "2020-01-01", "active"),
            raw_row(2, "Bob", Some(101), 70_000.0, "2021-01-01", "inactive"),
            raw_row(3, "Carol", Some(102), 0.0, "2019-01-01", "active"),
        ]);
        let out = clean_employees(&raw, as_of()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee_id, Some(1));
        for e in &out {
            assert!(e.status.as_deref() != Some("inactive"));
            assert!(e.salary != Some(0.0));
        }
    }

    #[test]
    fn derives_bucket_and_tenure() {
        let raw = raw_employees(vec![
            raw_row(1, "Alice", Some(101), 49_999.0, "2020-01-01", "active"),
            raw_row(2, "Bob", Some(101), 50_000.0, "2020-01-01", "active"),
            raw_row(3, "Carol", Some(101), 80_000.0, "2020-01-01", "active"),
            raw_row(4, "Dan", Some(101), 80_001.0, "2020-01-01", "active"),
        ]);
        let out = clean_employees(&raw, as_of()).unwrap();
        let buckets: Vec<_> = out.iter().map(|e| e.salary_bucket.unwrap()).collect();
        assert_eq!(
            buckets,
            vec![
                SalaryBucket::Low,
                SalaryBucket::Medium,
                SalaryBucket::Medium,
                SalaryBucket::High
            ]
        );
        // 2020-01-01 .. 2024-07-01 is 1643 days ~= 4.5 years.
        assert_eq!(out[0].tenure_years, Some(4.5));
    }

    #[test]
    fn missing_department_stays_absent() {
        let raw = raw_employees(vec![raw_row(
            1,
            "Alice",
            None,
            60_000.0,
            "2020-01-01",
            "active",
        )]);
        let out = clean_employees(&raw, as_of()).unwrap();
        assert_eq!(out[0].department_id, None);
    }

    #[test]
    fn malformed_date_cell_becomes_null_but_column_of_garbage_fails() {
        let mut rows = vec![
            raw_row(1, "Alice", Some(101), 60_000.0, "2020-01-01", "active"),
            raw_row(2, "Bob", Some(101), 60_000.0, "garbage", "active"),
        ];
        let raw = raw_employees(rows.clone());
        let out = clean_employees(&raw, as_of()).unwrap();
        assert_eq!(out[1].hire_date, None);
        assert_eq!(out[1].tenure_years, None);

        rows[0][4] = Value::Utf8("also garbage".to_string());
        let raw = raw_employees(rows);
        match clean_employees(&raw, as_of()) {
            Err(EtlError::UnparsableColumn { column, .. }) => assert_eq!(column, "hire_date"),
            other => panic!("expected UnparsableColumn, got {other:?}"),
        }
    }

    #[test]
    fn cleaning_is_idempotent_on_clean_shape() {
        let raw = raw_employees(vec![
            raw_row(1, "Alice", Some(101), 40_000.0, "2020-01-01", "active"),
            raw_row(2, "Bob", Some(101), 70_000.0, "2021-01-01", "active"),
        ]);
        let once = clean_employees(&raw, as_of()).unwrap();
        let again = clean_employees(&crate::model::to_row_set(&once), as_of()).unwrap();
        assert_eq!(once, again);
    }
}
