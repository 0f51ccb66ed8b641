//! Success envelope returned by every admin action

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Successful response: `{ "success": true, "data": ..., "total": n }`
///
/// Failures use [`ErrorEnvelope`](crate::core::error::ErrorEnvelope) with
/// the same `success` key, so the admin UI can branch on it alone.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Row count for list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> Envelope<T> {
    /// Wrap a single payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Wrap a list payload, recording its length as `total`
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            total: Some(data.len()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success without payload
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            total: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
