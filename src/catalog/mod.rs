//! Storefront catalog routes

pub mod handlers;
pub mod query;

pub use handlers::{CatalogState, CategoryListParams};
pub use query::CategoryQuery;

use axum::Router;
use axum::routing::get;

/// Build the storefront category routes
pub fn build_catalog_routes(state: CatalogState) -> Router {
    Router::new()
        .route("/store-api/categories", get(handlers::list_categories))
        .with_state(state)
}
