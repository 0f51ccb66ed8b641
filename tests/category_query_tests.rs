//! Storefront category listing through `Query<CategoryQuery>`

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use storefront_admin::prelude::*;

fn category(id: i64, parent_id: Option<i64>, description: &str, position: i32) -> Category {
    Category {
        id,
        parent_id,
        description: description.to_string(),
        position,
        active: true,
    }
}

fn create_test_server() -> TestServer {
    let categories = InMemoryRepository::with_rows(vec![
        category(1, None, "Root", 0),
        category(3, Some(1), "Deutsch", 0),
        category(5, Some(3), "Genuss", 2),
        category(6, Some(3), "Sommerwelten", 1),
        category(8, Some(3), "Wohnwelten", 0),
    ])
    .expect("valid category seed");

    let app = ServerBuilder::new()
        .with_payment_repository(InMemoryRepository::<PaymentMethod>::new())
        .with_category_repository(categories)
        .build()
        .expect("Failed to build app");

    TestServer::new(app).expect("Failed to create test server")
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data is a list")
        .iter()
        .filter_map(|c| c["id"].as_i64())
        .collect()
}

#[tokio::test]
async fn test_default_order_is_description_ascending() {
    let server = create_test_server();

    let response = server.get("/store-api/categories").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total"], 5);
    assert_eq!(ids(&body), vec![3, 5, 1, 6, 8]);
}

#[tokio::test]
async fn test_children_by_position_descending() {
    let server = create_test_server();

    let body: Value = server
        .get("/store-api/categories")
        .add_query_param("parentId", 3)
        .add_query_param("orderBy", "c.position")
        .add_query_param("direction", "DESC")
        .await
        .json();

    assert_eq!(ids(&body), vec![5, 6, 8]);
    assert_eq!(body["data"][0]["parentId"], 3);
}

#[tokio::test]
async fn test_filter_by_id() {
    let server = create_test_server();

    let body: Value = server
        .get("/store-api/categories")
        .add_query_param("id", 6)
        .await
        .json();

    assert_eq!(ids(&body), vec![6]);
}

#[tokio::test]
async fn test_undeclared_order_by_is_rejected() {
    let server = create_test_server();

    let response = server
        .get("/store-api/categories")
        .add_query_param("orderBy", "c.id")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_QUERY");
    assert_eq!(body["errorMsg"], "Invalid order by field 'c.id'");
}

#[tokio::test]
async fn test_unknown_parameter_is_rejected() {
    let server = create_test_server();

    let response = server
        .get("/store-api/categories")
        .add_query_param("search", "welten")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_BODY");
    assert!(
        body["errorMsg"]
            .as_str()
            .unwrap()
            .contains("unknown field `search`")
    );
}

#[tokio::test]
async fn test_malformed_query_string() {
    let server = create_test_server();

    let response = server
        .get("/store-api/categories")
        .add_query_param("parentId", "three")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["success"], false);
}
