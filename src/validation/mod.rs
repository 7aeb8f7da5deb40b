//! Data-quality validation.
//!
//! Validators inspect cleaned, typed records and return [`Issue`] lists; they
//! never mutate data and never fail. Whether issues block the run is the
//! orchestrator's policy decision, not theirs.
//!
//! The three generic checks in [`checks`] operate over any [`crate::model::Tabular`]
//! entity:
//!
//! - completeness: null/duplicate primary keys, missing/null required columns
//! - consistency: child foreign keys must exist in the parent key set (absent
//!   keys are excluded from the check)
//! - accuracy: an arbitrary per-row predicate with a human-readable description
//!
//! [`entities`] composes them into one validator per table.

pub mod checks;
pub mod entities;

pub use checks::{check_accuracy, check_completeness, check_consistency};
pub use entities::{
    validate_assignments, validate_employees, validate_projects, validate_reviews,
};

use std::fmt;

/// The kind of quality check that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Completeness,
    Consistency,
    Accuracy,
    Validity,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckKind::Completeness => "Completeness",
            CheckKind::Consistency => "Consistency",
            CheckKind::Accuracy => "Accuracy",
            CheckKind::Validity => "Validity",
        };
        f.write_str(s)
    }
}

/// One data-quality finding: which table, which kind of check, and what went
/// wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub table: String,
    pub kind: CheckKind,
    pub detail: String,
}

impl Issue {
    pub fn new(table: impl Into<String>, kind: CheckKind, detail: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} Error: {}", self.table, self.kind, self.detail)
    }
}
