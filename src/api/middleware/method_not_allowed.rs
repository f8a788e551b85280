//! Rewrites router-generated 405 responses into the application error payload.

use axum::{
    extract::Request,
    http::{header::ALLOW, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// Replace the empty 405 produced by method routing with an
/// [`AppError::MethodNotSupported`] body, keeping the `Allow` header.
pub async fn method_not_allowed_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let response = next.run(request).await;

    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(ALLOW).cloned();
    let mut translated =
        AppError::MethodNotSupported(format!("Request method '{}' not supported", method))
            .into_response();

    if let Some(allow) = allow {
        translated.headers_mut().insert(ALLOW, allow);
    }

    translated
}
