//! Extractors that deserialize and validate request input.
//!
//! Handlers receive already-validated values; anything malformed is turned
//! into an `AppError::Validation` (422) before the handler runs.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::Validate;

/// Extractor for a JSON body that must pass [`Validate`].
///
/// # Example
///
/// ```rust,ignore
/// async fn create_product(
///     ValidatedJson(product): ValidatedJson<ProductIn>,
/// ) -> Result<Json<Created>, AppError> {
///     // `product` is a `supermarket_core::Product`
/// }
/// ```
pub struct ValidatedJson<T: Validate>(pub T::Output);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        Ok(Self(payload.validate()?))
    }
}

/// Extractor for query parameters that must pass [`Validate`].
pub struct ValidatedQuery<T: Validate>(pub T::Output);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(params.validate()?))
    }
}
