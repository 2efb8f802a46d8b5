//! Custom extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use courier_core::types::DbId;
use courier_core::validation::validate_id;

use crate::error::AppError;

/// A positive numeric `{id}` path segment.
///
/// Non-numeric or non-positive ids are rejected with a JSON 400 before the
/// handler runs.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("invalid id".into()))?;
        let id: DbId = raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid id '{raw}'")))?;
        validate_id(id)?;
        Ok(IdPath(id))
    }
}
