// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Bearer auth middleware: compares the `Authorization` header's token
//! against the configured `APITOKEN`.

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;

fn extract_bearer(request: &Request) -> Option<&str> {
    request.headers().get(AUTHORIZATION)?.to_str().ok()?.strip_prefix("Bearer ")
}

/// `axum::middleware::from_fn_with_state` layer enforcing the auth
/// contract: missing or mismatched token -> 403.
pub async fn require_bearer_token(
    axum::extract::State(expected): axum::extract::State<String>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match extract_bearer(&request) {
        Some(token) if token == expected => Ok(next.run(request).await),
        _ => Err(ApiError::Auth),
    }
}
