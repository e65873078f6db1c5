//! Custom Axum extractors that reject with the `ApiError` envelope.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::validation::validate_id;

/// JSON body extractor; malformed bodies become `bad_request` errors
/// carrying the status axum chose (400, 415 or 422).
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::bad_request(rejection.body_text()).with_status(rejection.status())
            })?;
        Ok(Self(value))
    }
}

/// Extract and validate a resource id from the path
pub struct ResourceId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::validation_field("id", "Id is required"))?;

        validate_id(&id).map_err(|e| ApiError::validation_field("id", e))?;
        Ok(Self(id))
    }
}
