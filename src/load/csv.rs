//! CSV export implementation.

use std::path::Path;

use crate::error::EtlResult;
use crate::types::{RowSet, Value};

/// Write a row set to a CSV file.
///
/// Column order is preserved, a header row is written, dates render as
/// `YYYY-MM-DD`, nulls as empty cells. No synthetic row index is emitted.
pub fn export_row_set(row_set: &RowSet, path: impl AsRef<Path>) -> EtlResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    wtr.write_record(row_set.schema.field_names())?;
    for row in &row_set.rows {
        wtr.write_record(row.iter().map(render_cell))?;
    }
    wtr.flush()?;
    Ok(())
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
    }
}
