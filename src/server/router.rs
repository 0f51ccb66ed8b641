//! Router assembly for the admin server

use crate::acl::ROLE_HEADER;
use crate::catalog::{CatalogState, build_catalog_routes};
use crate::payment::{PaymentController, build_payment_routes};
use axum::http::Request;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Service name reported by the health routes
pub const SERVICE_NAME: &str = "storefront-admin";

/// Build the complete router: health, payment admin, catalog and custom routes
///
/// Every request gets an `http_request` span carrying method, uri and the
/// caller's admin role.
pub fn build_router(
    controller: PaymentController,
    catalog: CatalogState,
    custom_routes: Vec<Router>,
) -> Router {
    let mut app = health_routes()
        .merge(build_payment_routes(controller))
        .merge(build_catalog_routes(catalog));

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http().make_span_with(
            |request: &Request<_>| {
                let role = request
                    .headers()
                    .get(ROLE_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    role = %role,
                )
            },
        )),
    )
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}
