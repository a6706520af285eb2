//! Request extractors that turn malformed input into `400 Bad Request`
//! before a handler runs.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use village_core::types::DbId;

use crate::error::AppError;

pub const INVALID_ID: &str = "invalid id";
pub const INVALID_BODY: &str = "invalid body";

/// The `{id}` path segment, guaranteed to be a positive integer.
///
/// Anything else (non-numeric, zero, negative, overflow) is rejected with
/// `400 invalid id`.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub DbId);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest(INVALID_ID.into()))?;

        parse_id(&raw)
            .map(ResourceId)
            .ok_or_else(|| AppError::BadRequest(INVALID_ID.into()))
    }
}

/// Parse a path id, accepting only integers greater than zero.
pub fn parse_id(raw: &str) -> Option<DbId> {
    raw.parse::<DbId>().ok().filter(|id| *id > 0)
}

/// A JSON body that failed neither content-type nor deserialization checks.
///
/// Wraps [`Json`] so every rejection is reported uniformly as
/// `400 invalid body`.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
            AppError::BadRequest(INVALID_BODY.into())
        })?;
        Ok(ValidJson(value))
    }
}
