//! Performance-review cleaning and feature derivation.

use std::collections::HashMap;

use crate::model::{PerformanceCategory, Review};
use crate::types::{RowSet, Value};

use super::{cell, date_cell};

/// Clean the raw performance-reviews table.
///
/// Rows are sorted by (`employee_id`, `review_date`) ascending and then
/// deduplicated on that pair keeping the **last** occurrence, so for a tied
/// date the latest physical row wins. Rows whose rating falls outside
/// [1.0, 5.0] (including null ratings) are dropped. `latest_rating` is the
/// rating of the employee's last surviving row in sorted order, which is not
/// necessarily the maximum.
pub fn clean_reviews(raw: &RowSet) -> Vec<Review> {
    let schema = &raw.schema;
    let review_idx = schema.index_of("review_id");
    let emp_idx = schema.index_of("employee_id");
    let date_idx = schema.index_of("review_date");
    let rating_idx = schema.index_of("rating");
    let reviewer_idx = schema.index_of("reviewer_id");

    let mut reviews: Vec<Review> = raw
        .rows
        .iter()
        .map(|row| {
            let employee_id = cell(row, emp_idx).and_then(Value::as_i64);
            let reviewer_id = cell(row, reviewer_idx).and_then(Value::as_i64);
            let rating = cell(row, rating_idx).and_then(Value::as_f64);
            Review {
                review_id: cell(row, review_idx).and_then(Value::as_i64),
                employee_id,
                review_date: date_cell(row, date_idx),
                rating,
                reviewer_id,
                is_self_review: matches!((reviewer_id, employee_id), (Some(r), Some(e)) if r == e),
                performance_category: rating.map(PerformanceCategory::from_rating),
                latest_rating: None,
            }
        })
        .collect();

    if emp_idx.is_some() && date_idx.is_some() {
        // Stable sort keeps tied dates in physical order, so keep-last picks
        // the latest physical row.
        reviews.sort_by(|a, b| {
            (a.employee_id, a.review_date).cmp(&(b.employee_id, b.review_date))
        });
        reviews = dedup_keep_last(reviews);
    }

    if rating_idx.is_some() {
        reviews.retain(|r| matches!(r.rating, Some(x) if (1.0..=5.0).contains(&x)));
    }

    // Last surviving row per employee, in sorted order.
    let mut latest: HashMap<i64, f64> = HashMap::new();
    for r in &reviews {
        if let (Some(eid), Some(rating)) = (r.employee_id, r.rating) {
            latest.insert(eid, rating);
        }
    }
    for r in &mut reviews {
        r.latest_rating = r.employee_id.and_then(|eid| latest.get(&eid).copied());
    }

    reviews
}

/// Drop rows whose (`employee_id`, `review_date`) equals the next row's key.
fn dedup_keep_last(reviews: Vec<Review>) -> Vec<Review> {
    let mut out: Vec<Review> = Vec::with_capacity(reviews.len());
    for r in reviews {
        if let Some(prev) = out.last() {
            if prev.employee_id == r.employee_id && prev.review_date == r.review_date {
                out.pop();
            }
        }
        out.push(r);
    }
    out
}
