//! Page specification extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::Query;

use crate::errors::AppError;
use crate::types::{PageRequest, PaginationParams};

/// Resolved `page`/`size`/`sort` query parameters.
///
/// Uses the form-style query parser so `sort` may be repeated.
#[derive(Debug, Clone)]
pub struct Pageable(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pageable
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.to_string()))?;

        Ok(Pageable(PageRequest::try_from(params)?))
    }
}
