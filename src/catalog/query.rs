//! Category listing query
//!
//! Categories can be ordered by description or position and filtered by
//! their own id or their parent id.

use crate::core::query::{CriterionKind, OrderDirection, QueryDefinition};
use crate::core::{Criterion, Queryable};
use crate::entities::Category;
use std::cmp::Ordering;

pub const ORDER_BY_DESCRIPTION: &str = "c.description";
pub const ORDER_BY_POSITION: &str = "c.position";

/// Order-by fields and criteria of the category listing
#[derive(Debug, Clone, Copy)]
pub struct CategoryQuery;

impl QueryDefinition for CategoryQuery {
    const ORDER_BY: &'static [&'static str] = &[ORDER_BY_DESCRIPTION, ORDER_BY_POSITION];
    const CRITERIA: &'static [CriterionKind] = &[CriterionKind::Id, CriterionKind::ParentId];
    const DEFAULT_ORDER_BY: &'static str = ORDER_BY_DESCRIPTION;
    const DEFAULT_DIRECTION: OrderDirection = OrderDirection::Asc;
}

impl Queryable for Category {
    fn matches(&self, criterion: &Criterion) -> bool {
        match criterion {
            Criterion::Id(id) => self.id == *id,
            Criterion::ParentId(parent) => self.parent_id == Some(*parent),
        }
    }

    fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            ORDER_BY_POSITION => self.position.cmp(&other.position),
            _ => self.description.cmp(&other.description),
        }
    }
}
