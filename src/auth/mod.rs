//! Shared-secret gate for mutating routes.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name carrying the admin secret.
pub const ADMIN_SECRET_HEADER: &str = "x-admin-auth";

/// Middleware that rejects the request unless it carries the expected secret.
///
/// Runs before the handler, so a rejected request never reaches the store.
pub async fn admin_secret_layer(expected: String, request: Request, next: Next) -> Response {
    match provided_secret(request.headers()) {
        Some(provided) if constant_time_compare(&provided, &expected) => next.run(request).await,
        Some(_) => unauthorized_response("Invalid admin secret"),
        None => unauthorized_response("Missing admin secret"),
    }
}

/// Read the secret from `x-admin-auth`, falling back to a bearer token.
fn provided_secret(headers: &HeaderMap) -> Option<String> {
    let direct = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    direct.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string())
    })
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    AppError::Unauthorized(message.to_string()).into_response()
}
