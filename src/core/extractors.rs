//! Axum extractors producing admin errors instead of plain-text rejections

use crate::core::error::{AdminError, RequestError, ValidationError};
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been decoded and validated
///
/// Decoding failures reject with [`RequestError::InvalidBody`], validation
/// failures with [`ValidationError::FieldErrors`], so the client always gets
/// the error envelope.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_payment(
///     ValidatedJson(request): ValidatedJson<CreatePaymentRequest>,
/// ) -> AdminResult<Envelope<PaymentView>> {
///     // request is decoded and validated
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AdminError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody {
                message: e.body_text(),
            })?;

        payload.validate().map_err(ValidationError::from)?;

        Ok(Self(payload))
    }
}
