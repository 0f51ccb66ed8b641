//! Backend payment administration
//!
//! Routes, all under `/backend/payment`:
//! - GET  `getPayments` - payments as tree rows with countries and shops
//! - GET  `getCountries` - every country
//! - POST `createPayments` - create a payment
//! - POST `updatePayments` - update a payment
//! - ANY  `deletePayment` - delete a payment, POST only

pub mod controller;
pub mod handlers;
pub mod requests;
pub mod view;

pub use controller::{PAYMENT_RESOURCE, PaymentAction, PaymentController};
pub use requests::{CreatePaymentRequest, DeletePaymentRequest, UpdatePaymentRequest};
pub use view::PaymentView;

use axum::Router;
use axum::routing::{any, get, post};

/// Build the payment admin routes
pub fn build_payment_routes(controller: PaymentController) -> Router {
    Router::new()
        .route("/backend/payment/getPayments", get(handlers::get_payments))
        .route("/backend/payment/getCountries", get(handlers::get_countries))
        .route("/backend/payment/createPayments", post(handlers::create_payment))
        .route("/backend/payment/updatePayments", post(handlers::update_payment))
        .route("/backend/payment/deletePayment", any(handlers::delete_payment))
        .with_state(controller)
}
