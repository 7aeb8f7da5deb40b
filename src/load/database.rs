//! SQLite-backed relational store.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::EtlResult;
use crate::types::{DataType, RowSet, Value};

/// Analytical store for the finished dimension, fact, and summary tables.
///
/// Opening the store is the Load phase's single fallible resource
/// acquisition; dropping it releases the connection regardless of how the
/// phase ended.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the SQLite database at `path`.
    pub fn open(path: impl AsRef<Path>) -> EtlResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Replace the contents of `table` with `row_set`: create the table from
    /// the row-set schema if missing, truncate it, and bulk-insert all rows
    /// inside one transaction. Returns the inserted row count.
    pub fn replace_table(&mut self, row_set: &RowSet, table: &str) -> EtlResult<usize> {
        let columns: Vec<String> = row_set
            .schema
            .fields
            .iter()
            .map(|f| format!("{} {}", f.name, sql_type(f.data_type)))
            .collect();
        self.conn.execute(
            &format!("CREATE TABLE IF NOT EXISTS {table} ({})", columns.join(", ")),
            [],
        )?;

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DELETE FROM {table}"), [])?;

        let col_names: Vec<&str> = row_set.schema.field_names().collect();
        let placeholders: Vec<String> = (1..=col_names.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            col_names.join(", "),
            placeholders.join(", ")
        );
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in &row_set.rows {
                stmt.execute(rusqlite::params_from_iter(row.iter().map(sql_value)))?;
            }
        }
        tx.commit()?;

        debug!(table, rows = row_set.row_count(), "table replaced");
        Ok(row_set.row_count())
    }

    /// Create an index on `table(column)` if it does not already exist.
    pub fn create_index(&self, table: &str, column: &str) -> EtlResult<()> {
        self.conn.execute(
            &format!("CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table} ({column})"),
            [],
        )?;
        Ok(())
    }

    /// Row count of `table`, for verification.
    pub fn count(&self, table: &str) -> EtlResult<i64> {
        let n = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
        Ok(n)
    }
}

fn sql_type(dt: DataType) -> &'static str {
    match dt {
        DataType::Int64 | DataType::Bool => "INTEGER",
        DataType::Float64 => "REAL",
        DataType::Utf8 | DataType::Date => "TEXT",
    }
}

fn sql_value(value: &Value) -> rusqlite::types::Value {
    use rusqlite::types::Value as Sql;
    match value {
        Value::Null => Sql::Null,
        Value::Int64(v) => Sql::Integer(*v),
        Value::Float64(v) => Sql::Real(*v),
        Value::Bool(v) => Sql::Integer(i64::from(*v)),
        Value::Utf8(s) => Sql::Text(s.clone()),
        Value::Date(d) => Sql::Text(d.format("%Y-%m-%d").to_string()),
    }
}
