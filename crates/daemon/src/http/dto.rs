// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Wire-format request/response bodies. Named directly after their purpose
//! rather than reusing [`route_core::RouteRecord`] verbatim, so the wire
//! format can diverge from the storage representation (e.g. `to`/`via`
//! serialize as plain strings).

use chrono::{DateTime, Utc};
use ipnetwork::IpNetwork;
use route_core::{DeletedRecord, RouteRecord, RouteStatus};
use serde::{Deserialize, Serialize};

/// PUT `/routes/` body.
#[derive(Debug, Clone, Deserialize)]
pub struct PutRouteRequest {
    pub to: String,
    #[serde(default)]
    pub via: Option<String>,
    #[serde(default)]
    pub dev: Option<String>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delete_at: Option<DateTime<Utc>>,
}

/// PATCH `/routes/` body.
#[derive(Debug, Clone, Deserialize)]
pub struct PatchRouteRequest {
    pub to: String,
    #[serde(default)]
    pub via: Option<String>,
    #[serde(default)]
    pub dev: Option<String>,
    #[serde(default)]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delete_at: Option<DateTime<Utc>>,
}

/// The body shared by DELETE, pause, and activate: just the key.
#[derive(Debug, Clone, Deserialize)]
pub struct ToBody {
    pub to: String,
}

/// A generic `{"message": "..."}` success body shared by all mutating
/// endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Wire representation of a live [`RouteRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct RouteView {
    pub to: IpNetwork,
    pub via: Option<std::net::IpAddr>,
    pub dev: Option<String>,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub status: RouteStatus,
}

impl From<RouteRecord> for RouteView {
    fn from(r: RouteRecord) -> Self {
        Self {
            to: r.to,
            via: r.via,
            dev: r.dev,
            create_at: r.create_at,
            delete_at: r.delete_at,
            active: r.active,
            status: r.status,
        }
    }
}

/// Wire representation of a [`DeletedRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct DeletedRouteView {
    pub to: IpNetwork,
    pub via: Option<std::net::IpAddr>,
    pub dev: Option<String>,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
    pub status: RouteStatus,
    pub removed_at: DateTime<Utc>,
}

impl From<DeletedRecord> for DeletedRouteView {
    fn from(r: DeletedRecord) -> Self {
        Self {
            to: r.to,
            via: r.via,
            dev: r.dev,
            create_at: r.create_at,
            delete_at: r.delete_at,
            status: r.status,
            removed_at: r.removed_at,
        }
    }
}

/// GET `/routes` response.
#[derive(Debug, Clone, Serialize)]
pub struct RoutesResponse {
    pub database_routes: Vec<RouteView>,
    pub system_routes: Vec<String>,
}

/// GET `/routes/deleted` response.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedRoutesResponse {
    pub deleted_routes: Vec<DeletedRouteView>,
}
