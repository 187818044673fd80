// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Validation errors for route construction.

use thiserror::Error;

/// Raised while validating a [`crate::route::NewRouteInput`] or
/// [`crate::route::RoutePatchInput`] from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route 'to' is not a valid IP address or network: {0}")]
    InvalidDestination(String),

    #[error("route 'via' is not a valid IP address: {0}")]
    InvalidGateway(String),

    #[error("route must include at least one of 'via' or 'dev'")]
    MissingViaOrDev,

    #[error("dev '{0}' is not a valid network interface on this host")]
    UnknownInterface(String),

    #[error("delete_at '{delete_at}' has already passed")]
    DeleteAtInPast { delete_at: String },

    #[error("delete_at '{delete_at}' is before create_at '{create_at}'")]
    DeleteBeforeCreate { delete_at: String, create_at: String },
}
