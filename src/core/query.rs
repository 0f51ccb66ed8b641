//! Generic listing query with declared sort fields and filter criteria
//!
//! A concrete query (e.g. the category listing) only declares which order-by
//! fields and which criterion kinds it accepts through [`QueryDefinition`].
//! [`Query`] enforces that declaration while the query is built, and can run
//! itself over an in-memory collection of [`Queryable`] items.
//!
//! # Example
//! ```rust,ignore
//! let query = Query::<CategoryQuery>::new()
//!     .order_by("c.position")?
//!     .direction(OrderDirection::Desc)
//!     .criterion(Criterion::ParentId(3))?;
//! let categories = query.apply(all_categories);
//! ```

use crate::core::error::QueryError;
use crate::core::store::Queryable;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Sort direction of a listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for OrderDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(OrderDirection::Asc),
            "DESC" => Ok(OrderDirection::Desc),
            _ => Err(QueryError::InvalidDirection {
                direction: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Kinds of filter criteria a query may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    /// Filter by primary id
    Id,
    /// Filter by parent id
    ParentId,
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionKind::Id => write!(f, "id"),
            CriterionKind::ParentId => write!(f, "parentId"),
        }
    }
}

/// A single filter criterion with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Id(i64),
    ParentId(i64),
}

impl Criterion {
    pub fn kind(&self) -> CriterionKind {
        match self {
            Criterion::Id(_) => CriterionKind::Id,
            Criterion::ParentId(_) => CriterionKind::ParentId,
        }
    }
}

/// Declaration of what a concrete listing query accepts
pub trait QueryDefinition {
    /// Permitted order-by fields
    const ORDER_BY: &'static [&'static str];

    /// Permitted criterion kinds
    const CRITERIA: &'static [CriterionKind];

    /// Order-by field used when none is set
    const DEFAULT_ORDER_BY: &'static str;

    /// Direction used when none is set
    const DEFAULT_DIRECTION: OrderDirection = OrderDirection::Asc;
}

/// A listing query validated against its [`QueryDefinition`]
#[derive(Debug, Clone)]
pub struct Query<D> {
    order_by: &'static str,
    direction: OrderDirection,
    criteria: Vec<Criterion>,
    _definition: PhantomData<fn() -> D>,
}

impl<D: QueryDefinition> Query<D> {
    /// Create a query with the definition's default ordering and no criteria
    pub fn new() -> Self {
        Self {
            order_by: D::DEFAULT_ORDER_BY,
            direction: D::DEFAULT_DIRECTION,
            criteria: Vec::new(),
            _definition: PhantomData,
        }
    }

    /// Set the order-by field, rejecting fields the definition does not list
    pub fn order_by(mut self, field: &str) -> Result<Self, QueryError> {
        self.order_by = D::ORDER_BY
            .iter()
            .copied()
            .find(|valid| *valid == field)
            .ok_or_else(|| QueryError::InvalidOrderBy {
                field: field.to_string(),
            })?;
        Ok(self)
    }

    /// Set the sort direction
    pub fn direction(mut self, direction: OrderDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Add a criterion, rejecting kinds the definition does not list
    pub fn criterion(mut self, criterion: Criterion) -> Result<Self, QueryError> {
        if !D::CRITERIA.contains(&criterion.kind()) {
            return Err(QueryError::InvalidCriterion {
                criterion: criterion.kind().to_string(),
            });
        }
        self.criteria.push(criterion);
        Ok(self)
    }

    pub fn order_field(&self) -> &'static str {
        self.order_by
    }

    pub fn order_direction(&self) -> OrderDirection {
        self.direction
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Run the query over a collection: keep items matching every criterion,
    /// then sort them (stable) by the order-by field and direction.
    pub fn apply<T: Queryable>(&self, items: Vec<T>) -> Vec<T> {
        let mut result: Vec<T> = items
            .into_iter()
            .filter(|item| self.criteria.iter().all(|c| item.matches(c)))
            .collect();

        result.sort_by(|a, b| {
            let ordering = a.compare_by(b, self.order_by);
            match self.direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            }
        });

        result
    }
}

impl<D: QueryDefinition> Default for Query<D> {
    fn default() -> Self {
        Self::new()
    }
}
