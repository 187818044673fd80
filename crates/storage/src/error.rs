// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Errors surfaced by [`crate::store::RouteStore`] and persistence.

use thiserror::Error;

/// Failure modes of a [`crate::store::RouteStore`] operation.
///
/// `Backend` wraps the underlying I/O/serialization failure unmodified.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("route '{0}' already exists")]
    Conflict(String),

    #[error("route '{0}' not found")]
    NotFound(String),

    #[error("route '{0}' matched more than one record")]
    Ambiguous(String),

    #[error("storage backend error: {0}")]
    Backend(#[from] PersistError),
}

/// Failure modes of the snapshot persistence layer.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
