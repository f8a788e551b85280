//! Path extractors that reject with the application error payload.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use validator::Validate;

use super::validated_json::format_validation_errors;
use crate::errors::AppError;

/// Numeric user id taken from the last path segment
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        Ok(UserId(id))
    }
}

#[derive(Debug, Validate)]
struct EmailParam {
    #[validate(email(message = "Invalid email format"))]
    email: String,
}

/// Email address taken from the last path segment, format-checked
#[derive(Debug, Clone)]
pub struct ValidEmail(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ValidEmail
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(email) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let param = EmailParam { email };
        param
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidEmail(param.email))
    }
}
