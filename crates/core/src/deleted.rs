// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! History record written whenever a route leaves the live store, whether by
//! explicit DELETE or by expiring out of the reconciler.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::route::{RouteRecord, RouteStatus};

/// A snapshot of a [`RouteRecord`] taken at the moment it was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedRecord {
    pub to: IpNetwork,
    pub via: Option<IpAddr>,
    pub dev: Option<String>,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
    pub status: RouteStatus,
    pub removed_at: DateTime<Utc>,
}

impl DeletedRecord {
    /// Build a history entry from a live record at the instant it is removed.
    pub fn from_record(record: &RouteRecord, removed_at: DateTime<Utc>) -> Self {
        Self {
            to: record.to,
            via: record.via,
            dev: record.dev.clone(),
            create_at: record.create_at,
            delete_at: record.delete_at,
            status: record.status,
            removed_at,
        }
    }
}
