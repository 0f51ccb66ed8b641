//! HTTP handlers for the payment admin endpoints
//!
//! Handlers stay thin: ACL check first, then the controller. Body extraction
//! errors are deferred so a caller without the privilege gets the denial
//! rather than a decoding error.

use super::controller::{PaymentAction, PaymentController};
use super::requests::{CreatePaymentRequest, DeletePaymentRequest, UpdatePaymentRequest};
use super::view::PaymentView;
use crate::core::error::{AdminError, AdminResult};
use crate::core::{Envelope, ValidatedJson};
use crate::entities::Country;
use axum::body::Bytes;
use axum::extract::{Query, State, rejection::QueryRejection};
use axum::http::{HeaderMap, Method};
use serde_json::Value;

/// List all payments as tree rows
pub async fn get_payments(
    State(controller): State<PaymentController>,
    headers: HeaderMap,
) -> AdminResult<Envelope<Vec<PaymentView>>> {
    controller.authorize(&headers, PaymentAction::GetPayments)?;
    Ok(Envelope::list(controller.list_payments().await?))
}

/// List all countries
pub async fn get_countries(
    State(controller): State<PaymentController>,
) -> AdminResult<Envelope<Vec<Country>>> {
    Ok(Envelope::list(controller.list_countries().await?))
}

/// Create a payment
pub async fn create_payment(
    State(controller): State<PaymentController>,
    headers: HeaderMap,
    request: Result<ValidatedJson<CreatePaymentRequest>, AdminError>,
) -> AdminResult<Envelope<PaymentView>> {
    controller.authorize(&headers, PaymentAction::CreatePayments)?;
    let ValidatedJson(request) = request?;
    Ok(Envelope::ok(controller.create_payment(request).await?))
}

/// Update a payment
pub async fn update_payment(
    State(controller): State<PaymentController>,
    headers: HeaderMap,
    request: Result<ValidatedJson<UpdatePaymentRequest>, AdminError>,
) -> AdminResult<Envelope<PaymentView>> {
    controller.authorize(&headers, PaymentAction::UpdatePayments)?;
    let ValidatedJson(request) = request?;
    Ok(Envelope::ok(controller.update_payment(request).await?))
}

/// Delete a payment
///
/// Routed for every method so non-POST calls get the envelope instead of a
/// bare 405. The id is read from the JSON body, falling back to the query
/// string.
pub async fn delete_payment(
    State(controller): State<PaymentController>,
    method: Method,
    headers: HeaderMap,
    query: Result<Query<DeletePaymentRequest>, QueryRejection>,
    body: Bytes,
) -> AdminResult<Envelope<()>> {
    controller.authorize(&headers, PaymentAction::DeletePayment)?;

    let id = id_from_body(&body).or_else(|| query.ok().and_then(|Query(q)| q.id));
    controller.delete_payment(&method, id).await?;

    Ok(Envelope::empty())
}

// The UI posts ids as numbers or numeric strings
fn id_from_body(body: &[u8]) -> Option<i64> {
    if body.is_empty() {
        return None;
    }
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
