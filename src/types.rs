//! Core tabular types shared by every pipeline stage.
//!
//! Source tables are ingested into an in-memory [`RowSet`], using a fixed per-table
//! [`Schema`] (a list of typed [`Field`]s). Cleaned and aggregated data is handed back
//! to the flat-table boundary (CSV export, SQLite load) as row sets too.

use chrono::NaiveDate;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Calendar date (no time component).
    Date,
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the expected shape of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`RowSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view of the value, if it is an `Int64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value. `Int64` widens to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// String view of the value, if it is `Utf8`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Boolean view of the value, if it is `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Date view of the value, if it is `Date`.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map(Value::Int64).unwrap_or(Value::Null)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map(Value::Float64).unwrap_or(Value::Null)
    }
}

impl From<Option<bool>> for Value {
    fn from(v: Option<bool>) -> Self {
        v.map(Value::Bool).unwrap_or(Value::Null)
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map(Value::Utf8).unwrap_or(Value::Null)
    }
}

impl From<Option<NaiveDate>> for Value {
    fn from(v: Option<NaiveDate>) -> Self {
        v.map(Value::Date).unwrap_or(Value::Null)
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields.
/// Every transformation returns a new row set; a row set handed downstream is never
/// mutated by the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    /// Create a row set from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the row set.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a single cell by row index and column name.
    ///
    /// Returns `None` when the column does not exist or the row index is out of range.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Create a new row set containing only rows that match `predicate`.
    ///
    /// The returned row set preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new row set by applying `mapper` to every row.
    ///
    /// The returned row set preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new row set with rows ordered by `compare`.
    ///
    /// The sort is stable: rows that compare equal keep their original relative order.
    pub fn sorted_by<F>(&self, mut compare: F) -> Self
    where
        F: FnMut(&[Value], &[Value]) -> std::cmp::Ordering,
    {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| compare(a.as_slice(), b.as_slice()));
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new row set containing only the named columns, in the given order.
    ///
    /// Columns missing from the schema are skipped, so a projection over a partially
    /// populated source keeps whatever subset exists.
    pub fn select(&self, columns: &[&str]) -> Self {
        let picked: Vec<usize> = columns
            .iter()
            .filter_map(|name| self.schema.index_of(name))
            .collect();

        let schema = Schema::new(
            picked
                .iter()
                .map(|&idx| self.schema.fields[idx].clone())
                .collect(),
        );
        let rows = self
            .rows
            .iter()
            .map(|row| picked.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Self { schema, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, Field, RowSet, Schema, Value};
    use chrono::NaiveDate;

    fn sample() -> RowSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("hired", DataType::Date),
        ]);
        let rows = vec![
            vec![
                Value::Int64(2),
                Value::Utf8("b".to_string()),
                Value::Date(NaiveDate::from_ymd_opt(2021, 3, 15).unwrap()),
            ],
            vec![Value::Int64(1), Value::Utf8("a".to_string()), Value::Null],
        ];
        RowSet::new(schema, rows)
    }

    #[test]
    fn cell_lookup_by_name() {
        let rs = sample();
        assert_eq!(rs.cell(0, "id"), Some(&Value::Int64(2)));
        assert_eq!(rs.cell(1, "hired"), Some(&Value::Null));
        assert_eq!(rs.cell(0, "missing"), None);
        assert_eq!(rs.cell(9, "id"), None);
    }

    #[test]
    fn filter_rows_keeps_schema_and_matching_rows() {
        let rs = sample();
        let id_idx = rs.schema.index_of("id").unwrap();
        let out = rs.filter_rows(|row| matches!(row.get(id_idx), Some(Value::Int64(v)) if *v > 1));
        assert_eq!(out.schema, rs.schema);
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][0], Value::Int64(2));
        // Original unchanged
        assert_eq!(rs.row_count(), 2);
    }

    #[test]
    fn map_rows_transforms_values_and_preserves_schema() {
        let rs = sample();
        let out = rs.map_rows(|row| {
            let mut mapped = row.to_vec();
            if let Value::Int64(v) = mapped[0] {
                mapped[0] = Value::Int64(v + 10);
            }
            mapped
        });
        assert_eq!(out.schema, rs.schema);
        assert_eq!(out.rows[0][0], Value::Int64(12));
        assert_eq!(rs.rows[0][0], Value::Int64(2));
    }

    #[test]
    #[should_panic(expected = "mapped row length")]
    fn map_rows_panics_if_mapper_returns_wrong_arity() {
        let rs = sample();
        let _ = rs.map_rows(|_row| vec![Value::Int64(1)]);
    }

    #[test]
    fn sorted_by_orders_rows_and_keeps_schema() {
        let rs = sample();
        let out = rs.sorted_by(|a, b| a[0].as_i64().cmp(&b[0].as_i64()));
        assert_eq!(out.schema, rs.schema);
        assert_eq!(out.rows[0][0], Value::Int64(1));
        assert_eq!(out.rows[1][0], Value::Int64(2));
        // Original unchanged
        assert_eq!(rs.rows[0][0], Value::Int64(2));
    }

    #[test]
    fn select_projects_columns_in_order() {
        let rs = sample();
        let out = rs.select(&["name", "id"]);
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["name", "id"]
        );
        assert_eq!(
            out.rows[0],
            vec![Value::Utf8("b".to_string()), Value::Int64(2)]
        );
    }

    #[test]
    fn select_skips_missing_columns() {
        let rs = sample();
        let out = rs.select(&["id", "salary"]);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn value_numeric_views_widen_ints() {
        assert_eq!(Value::Int64(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float64(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Null.as_f64(), None);
        assert!(Value::Null.is_null());
    }
}
