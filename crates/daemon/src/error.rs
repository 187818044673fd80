// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! The HTTP-facing error type: wraps every failure this service can
//! surface to a client and maps each variant to a response status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use route_actuator::ActuatorError;
use route_core::ValidationError;
use route_storage::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing or invalid bearer token")]
    Auth,

    #[error("route '{to}' is not in a state that allows this operation: {reason}")]
    Precondition { to: String, reason: &'static str },

    #[error("kernel command failed: {0}")]
    Actuator(String),

    #[error("storage backend error: {0}")]
    Storage(#[from] StoreError),
}

impl From<ActuatorError> for ApiError {
    fn from(err: ActuatorError) -> Self {
        // Idempotency signals never reach this conversion: call sites treat
        // `AlreadyExists`/`NotPresent` as benign before propagating an
        // actuator error.
        ApiError::Actuator(err.to_string())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth => StatusCode::FORBIDDEN,
            ApiError::Precondition { .. } => StatusCode::CONFLICT,
            ApiError::Actuator(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Storage(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Storage(StoreError::Ambiguous(_)) => StatusCode::CONFLICT,
            ApiError::Storage(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
