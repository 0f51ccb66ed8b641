//! End-to-end tests for the payment admin endpoints
//!
//! These tests drive the full router through `axum_test::TestServer` with
//! in-memory repositories and check:
//! - the tree listing (icons, labels, per-country surcharges)
//! - create and update semantics (name conflicts, id normalization, action)
//! - the delete guard and the POST-only rule

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};
use storefront_admin::entities::DELETABLE_SOURCE;
use storefront_admin::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

fn country(id: i64, name: &str, iso: &str) -> Country {
    Country {
        id,
        name: name.to_string(),
        iso: iso.to_string(),
        iso3: String::new(),
        active: true,
        position: 0,
    }
}

fn payment(id: i64, name: &str, description: &str) -> PaymentMethod {
    let mut payment = PaymentMethod::new(name);
    payment.id = id;
    payment.description = description.to_string();
    payment
}

struct Fixture {
    server: TestServer,
    payments: InMemoryRepository<PaymentMethod>,
}

fn create_test_server() -> Fixture {
    let mut debit = payment(2, "debit", "Lastschrift");
    debit.action = "debit".to_string();
    debit.plugin_id = Some(7);
    debit.countries = vec![2];

    let mut cash = payment(3, "cash", "Nachnahme");
    cash.active = true;
    cash.surcharges = "DE:1.50;AT:2.00".parse().expect("valid surcharges");
    cash.countries = vec![2, 23, 25];
    cash.shops = vec![1];

    let mut custom = payment(10, "custom_invoice", "Custom invoice");
    custom.source = Some(DELETABLE_SOURCE);

    let payments =
        InMemoryRepository::with_rows(vec![debit, cash, custom]).expect("valid payment seed");
    let countries = InMemoryRepository::with_rows(vec![
        country(2, "Deutschland", "DE"),
        country(23, "Österreich", "AT"),
        country(25, "Frankreich", "FR"),
    ])
    .expect("valid country seed");
    let shops = InMemoryRepository::with_rows(vec![
        Shop {
            id: 1,
            name: "Main".to_string(),
            host: Some("localhost".to_string()),
            active: true,
        },
        Shop {
            id: 2,
            name: "English".to_string(),
            host: None,
            active: true,
        },
    ])
    .expect("valid shop seed");

    let app = ServerBuilder::new()
        .with_payment_repository(payments.clone())
        .with_country_repository(countries)
        .with_shop_repository(shops)
        .build()
        .expect("Failed to build app");

    let server = TestServer::new(app).expect("Failed to create test server");

    Fixture { server, payments }
}

fn find_row<'a>(rows: &'a [Value], id: i64) -> &'a Value {
    rows.iter()
        .find(|row| row["id"] == id)
        .expect("row present in listing")
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoints() {
        let fixture = create_test_server();

        for path in ["/health", "/healthz"] {
            let response = fixture.server.get(path).await;
            response.assert_status_ok();

            let body: Value = response.json();
            assert_eq!(body["status"], "ok");
            assert_eq!(body["service"], "storefront-admin");
        }
    }
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_payments_envelope() {
        let fixture = create_test_server();

        let response = fixture.server.get("/backend/payment/getPayments").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 3);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_tree_row_icons_and_labels() {
        let fixture = create_test_server();

        let body: Value = fixture.server.get("/backend/payment/getPayments").await.json();
        let rows = body["data"].as_array().expect("data is a list");

        let cash = find_row(rows, 3);
        assert_eq!(cash["iconCls"], "sprite-tick-small");
        assert_eq!(cash["text"], "Nachnahme (3)");
        assert_eq!(cash["leaf"], true);

        let debit = find_row(rows, 2);
        assert_eq!(debit["iconCls"], "sprite-cross-small");
        assert_eq!(debit["text"], "Lastschrift (2)");
    }

    #[tokio::test]
    async fn test_country_surcharges_are_merged() {
        let fixture = create_test_server();

        let body: Value = fixture.server.get("/backend/payment/getPayments").await.json();
        let cash = find_row(body["data"].as_array().expect("data is a list"), 3);
        let countries = cash["countries"].as_array().expect("countries is a list");

        assert_eq!(countries.len(), 3);
        assert_eq!(countries[0]["iso"], "DE");
        assert_eq!(countries[0]["surcharge"], "1.50");
        assert_eq!(countries[1]["iso"], "AT");
        assert_eq!(countries[1]["surcharge"], "2.00");
        assert_eq!(countries[2]["iso"], "FR");
        assert!(countries[2].get("surcharge").is_none());

        assert_eq!(cash["surchargeString"], "DE:1.50;AT:2.00");
        assert_eq!(cash["shops"][0]["name"], "Main");
    }

    #[tokio::test]
    async fn test_get_countries() {
        let fixture = create_test_server();

        let response = fixture.server.get("/backend/payment/getCountries").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 3);
        assert_eq!(body["data"][1]["iso"], "AT");
    }
}

// =============================================================================
// Create Tests
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_payment() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({
                "name": "sepa",
                "description": "SEPA direct debit",
                "debitPercent": "2,5",
                "surchargeString": "DE:1,00",
                "active": true,
                "source": 0,
                "countries": [{"id": 2}, {"id": 23}],
                "shops": [{"id": 1}, {"id": 2}]
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let data = &body["data"];
        assert_eq!(data["name"], "sepa");
        assert_eq!(data["debitPercent"], "2.5");
        assert_eq!(data["surchargeString"], "DE:1.00");
        assert_eq!(data["source"], Value::Null);
        assert_eq!(data["action"], "");
        assert_eq!(data["countries"].as_array().map(Vec::len), Some(2));
        assert_eq!(data["countries"][0]["surcharge"], "1.00");
        assert_eq!(data["shops"].as_array().map(Vec::len), Some(2));

        let id = data["id"].as_i64().expect("id assigned");
        let stored = fixture.payments.find(id).await.unwrap().expect("persisted");
        assert_eq!(stored.source, None);
        assert_eq!(stored.countries, vec![2, 23]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({"name": "cash", "description": "Second cash"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["errorMsg"], "The name is already in use.");

        assert_eq!(fixture.payments.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_ignores_action() {
        let fixture = create_test_server();

        let body: Value = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({"name": "sofort", "action": "sofort"}))
            .await
            .json();

        assert_eq!(body["data"]["action"], "");
    }

    #[tokio::test]
    async fn test_create_with_unknown_shop_fails() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({"name": "sepa", "shops": [{"id": 42}]}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["errorMsg"], "shop with id '42' not found");
        assert_eq!(fixture.payments.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_with_malformed_surcharges_fails() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({"name": "sepa", "surchargeString": "DE-1.00"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_SURCHARGE");
    }

    #[tokio::test]
    async fn test_create_with_empty_name_fails_validation() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({"name": ""}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_with_malformed_body_fails() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/createPayments")
            .json(&json!({"description": "no name"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_BODY");
    }
}

// =============================================================================
// Update Tests
// =============================================================================

mod update_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_keeps_action_and_untouched_fields() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({
                "id": 2,
                "action": "",
                "active": true,
                "surcharge": "3,75"
            }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["action"], "debit");
        assert_eq!(data["description"], "Lastschrift");
        assert_eq!(data["surcharge"], "3.75");
        assert_eq!(data["iconCls"], "sprite-tick");
        assert!(data.get("text").is_none());

        let stored = fixture.payments.find(2).await.unwrap().expect("still stored");
        assert_eq!(stored.action, "debit");
        assert!(stored.active);
    }

    #[tokio::test]
    async fn test_update_normalizes_zero_ids() {
        let fixture = create_test_server();

        fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({"id": 2, "pluginId": 0, "source": 0}))
            .await
            .assert_status_ok();

        let stored = fixture.payments.find(2).await.unwrap().expect("still stored");
        assert_eq!(stored.plugin_id, None);
        assert_eq!(stored.source, None);
    }

    #[tokio::test]
    async fn test_update_replaces_non_empty_associations() {
        let fixture = create_test_server();

        fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({"id": 3, "countries": [{"id": 25}], "shops": []}))
            .await
            .assert_status_ok();

        let stored = fixture.payments.find(3).await.unwrap().expect("still stored");
        assert_eq!(stored.countries, vec![25]);
        assert_eq!(stored.shops, vec![1]);
    }

    #[tokio::test]
    async fn test_inactive_update_returns_cross_icon() {
        let fixture = create_test_server();

        let body: Value = fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({"id": 3, "active": false}))
            .await
            .json();

        assert_eq!(body["data"]["iconCls"], "sprite-cross");
    }

    #[tokio::test]
    async fn test_update_accepts_numeric_flags() {
        let fixture = create_test_server();

        let body: Value = fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({"id": 2, "active": 1, "hide": "0", "esdActive": "1"}))
            .await
            .json();
        assert_eq!(body["success"], true);

        let stored = fixture.payments.find(2).await.unwrap().unwrap();
        assert!(stored.active);
        assert!(!stored.hide);
        assert!(stored.esd_active);
    }

    #[tokio::test]
    async fn test_update_unknown_payment() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({"id": 999, "active": true}))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_rename_onto_existing_name_conflicts() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/updatePayments")
            .json(&json!({"id": 2, "name": "cash"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);

        let stored = fixture.payments.find(2).await.unwrap().expect("still stored");
        assert_eq!(stored.name, "debit");
    }
}

// =============================================================================
// Delete Tests
// =============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_custom_payment() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/deletePayment")
            .json(&json!({"id": 10}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body, json!({"success": true}));
        assert!(fixture.payments.find(10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_with_id_in_query_string() {
        let fixture = create_test_server();

        fixture
            .server
            .post("/backend/payment/deletePayment")
            .add_query_param("id", 10)
            .await
            .assert_status_ok();

        assert!(fixture.payments.find(10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_default_payment_cannot_be_deleted() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/deletePayment")
            .json(&json!({"id": 3}))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["errorMsg"], "Default payments can not be deleted");
        assert!(fixture.payments.find(3).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_non_post_delete_is_rejected() {
        let fixture = create_test_server();

        for method in [Method::GET, Method::DELETE, Method::PUT] {
            let response = fixture
                .server
                .method(method, "/backend/payment/deletePayment")
                .add_query_param("id", 10)
                .await;
            response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

            let body: Value = response.json();
            assert_eq!(body["errorMsg"], "Empty Post Request");
        }

        assert!(fixture.payments.find(10).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_payment() {
        let fixture = create_test_server();

        fixture
            .server
            .post("/backend/payment/deletePayment")
            .json(&json!({"id": 404}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_without_id() {
        let fixture = create_test_server();

        let response = fixture
            .server
            .post("/backend/payment/deletePayment")
            .json(&json!({}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_BODY");
    }
}
