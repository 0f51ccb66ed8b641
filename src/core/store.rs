//! Store traits for filtering and sorting

use crate::core::query::Criterion;
use std::cmp::Ordering;

/// Trait for records that a [`Query`](crate::core::query::Query) can run over
///
/// Implement this for every entity exposed through a listing query. Only the
/// criteria and order-by fields the query definition declares ever reach
/// these methods.
pub trait Queryable {
    /// Whether this record satisfies the criterion
    fn matches(&self, criterion: &Criterion) -> bool;

    /// Compare two records by the given order-by field
    fn compare_by(&self, other: &Self, field: &str) -> Ordering;
}
