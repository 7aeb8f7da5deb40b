use employee_etl::ingestion::{SourceTable, read_csv_from_reader, read_table};
use employee_etl::types::Value;

use std::path::Path;

#[test]
fn read_employees_happy_path() {
    let ds = read_table(Path::new("tests/fixtures"), SourceTable::Employees).unwrap();

    assert_eq!(ds.row_count(), 25);
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Rajesh Kumar".to_string()),
            Value::Int64(101),
            Value::Float64(75_000.0),
            Value::Utf8("2021-03-15".to_string()),
            Value::Null,
            Value::Utf8("Y".to_string()),
            Value::Utf8("active".to_string()),
        ]
    );
}

#[test]
fn empty_cells_become_null() {
    let ds = read_table(Path::new("tests/fixtures"), SourceTable::Departments).unwrap();
    // Operations has no manager on record.
    assert_eq!(ds.cell(4, "manager_id"), Some(&Value::Null));
}

#[test]
fn read_csv_allows_reordered_columns() {
    let schema = SourceTable::Departments.schema();
    let input = "location,department_id,manager_id,budget,department_name\nMumbai,102,2,3500000,Sales\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = read_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][0], Value::Int64(102));
    assert_eq!(ds.rows[0][1], Value::Utf8("Sales".to_string()));
}

#[test]
fn read_csv_errors_on_missing_required_column() {
    let schema = SourceTable::Departments.schema();
    let input = "department_id,department_name\n101,Engineering\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = read_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'location'"));
}

#[test]
fn read_csv_errors_on_type_parse() {
    let schema = SourceTable::Departments.schema();
    let input = "department_id,department_name,location,budget,manager_id\nnot_an_int,Engineering,Bangalore,1000,1\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = read_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value"));
    assert!(msg.contains("column 'department_id'"));
}
