//! Storefront category listing handler

use super::query::CategoryQuery;
use crate::core::error::{AdminError, AdminResult, RequestError};
use crate::core::{Criterion, Envelope, OrderDirection, Query, Repository};
use crate::entities::Category;
use axum::extract::{self, State, rejection::QueryRejection};
use serde::Deserialize;
use std::sync::Arc;

/// State of the storefront catalog routes
#[derive(Clone)]
pub struct CatalogState {
    pub categories: Arc<dyn Repository<Category>>,
}

/// Query string of the category listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryListParams {
    pub order_by: Option<String>,
    pub direction: Option<String>,
    pub id: Option<i64>,
    pub parent_id: Option<i64>,
}

impl CategoryListParams {
    /// Build the validated listing query
    pub fn to_query(&self) -> Result<Query<CategoryQuery>, AdminError> {
        let mut query = Query::<CategoryQuery>::new();

        if let Some(field) = &self.order_by {
            query = query.order_by(field)?;
        }
        if let Some(direction) = &self.direction {
            query = query.direction(direction.parse::<OrderDirection>()?);
        }
        if let Some(id) = self.id {
            query = query.criterion(Criterion::Id(id))?;
        }
        if let Some(parent_id) = self.parent_id {
            query = query.criterion(Criterion::ParentId(parent_id))?;
        }

        Ok(query)
    }
}

/// List categories
pub async fn list_categories(
    State(state): State<CatalogState>,
    params: Result<extract::Query<CategoryListParams>, QueryRejection>,
) -> AdminResult<Envelope<Vec<Category>>> {
    let extract::Query(params) = params.map_err(|e| RequestError::InvalidBody {
        message: e.body_text(),
    })?;
    let query = params.to_query()?;

    let categories = query.apply(state.categories.list().await?);
    tracing::debug!(
        order_by = query.order_field(),
        direction = %query.order_direction(),
        count = categories.len(),
        "listed categories"
    );

    Ok(Envelope::list(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::QueryError;

    #[test]
    fn test_params_map_to_query() {
        let params = CategoryListParams {
            order_by: Some("c.position".to_string()),
            direction: Some("desc".to_string()),
            parent_id: Some(3),
            ..Default::default()
        };

        let query = params.to_query().unwrap();
        assert_eq!(query.order_field(), "c.position");
        assert_eq!(query.order_direction(), OrderDirection::Desc);
        assert_eq!(query.criteria(), &[Criterion::ParentId(3)]);
    }

    #[test]
    fn test_invalid_direction() {
        let params = CategoryListParams {
            direction: Some("sideways".to_string()),
            ..Default::default()
        };

        let err = params.to_query().unwrap_err();
        assert!(matches!(
            err,
            AdminError::Query(QueryError::InvalidDirection { .. })
        ));
    }
}
