//! Cross-table aggregation into the derived summary tables.
//!
//! Aggregators are pure functions over already-cleaned typed records. Every
//! join is a left join anchored on the dimension side, so each department,
//! employee, and project is represented even with zero matches; numeric gaps
//! zero-fill and rating/salary averages stay absent rather than faking `0.0`.
//!
//! - [`department_summary::department_summary`]
//! - [`employee_performance::employee_performance`]
//! - [`project_workload::project_workload`]

pub mod department_summary;
pub mod employee_performance;
pub mod project_workload;

pub use department_summary::department_summary;
pub use employee_performance::employee_performance;
pub use project_workload::project_workload;
