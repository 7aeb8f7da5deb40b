//! Load-phase collaborators: the flat-file exporter and the relational store.
//!
//! Both sinks consume plain [`crate::types::RowSet`]s; by the time data gets
//! here every transformation is done and the only decisions left are
//! formatting (dates as `YYYY-MM-DD`, no synthetic index column) and storage
//! mechanics (truncate-and-insert inside a transaction, fixed index set).

pub mod csv;
pub mod database;

pub use self::csv::export_row_set;
pub use database::Store;
