// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Route domain types: the record, its lifecycle status, and the
//! constructor-style validation that replaces attached field validators.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Administrative + time-derived status of a route record.
///
/// `Deleted` only ever appears on a [`crate::deleted::DeletedRecord`] snapshot,
/// never on a live `RouteRecord`, but it shares the enum so a single
/// `removal_status` value can travel from store delete call to history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Pending,
    Active,
    Expired,
    Paused,
    Deleted,
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RouteStatus::Pending => "pending",
            RouteStatus::Active => "active",
            RouteStatus::Expired => "expired",
            RouteStatus::Paused => "paused",
            RouteStatus::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Time-derived classification of a route's activation window against "now".
///
/// Distinct from [`RouteStatus`]: phase is a pure function of
/// `(create_at, delete_at, now)`, while status also carries the
/// administrative `paused` overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Active,
    Expired,
}

/// Classify a window against `now`.
///
/// Precondition (enforced at construction, see [`validate_new_route`]):
/// `delete_at.is_none() || delete_at >= Some(create_at)`.
pub fn classify_phase(
    create_at: DateTime<Utc>,
    delete_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Phase {
    if create_at > now {
        return Phase::Pending;
    }
    if let Some(delete_at) = delete_at {
        if delete_at <= now {
            return Phase::Expired;
        }
    }
    Phase::Active
}

/// A durable route declaration: unique by `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub to: IpNetwork,
    pub via: Option<IpAddr>,
    pub dev: Option<String>,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub status: RouteStatus,
}

impl RouteRecord {
    /// Normalized string form of `to`, used as the store's primary key.
    pub fn key(&self) -> String {
        self.to.to_string()
    }
}

/// The validated, not-yet-classified shape of a client-submitted route.
///
/// Produced by [`validate_new_route`]; carries no `active`/`status` because
/// those are derived by the caller from [`classify_phase`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRoute {
    pub to: IpNetwork,
    pub via: Option<IpAddr>,
    pub dev: Option<String>,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

impl ValidatedRoute {
    pub fn into_record(self, active: bool, status: RouteStatus) -> RouteRecord {
        RouteRecord {
            to: self.to,
            via: self.via,
            dev: self.dev,
            create_at: self.create_at,
            delete_at: self.delete_at,
            active,
            status,
        }
    }
}

/// Raw, untrusted input for a PUT request, before validation.
///
/// Empty strings in `via`/`dev` are treated the same as absent; callers at
/// the HTTP boundary should perform that coercion before calling
/// [`validate_new_route`], or simply never populate the field with `""`.
#[derive(Debug, Clone, Default)]
pub struct NewRouteInput {
    pub to: String,
    pub via: Option<String>,
    pub dev: Option<String>,
    pub create_at: Option<DateTime<Utc>>,
    pub delete_at: Option<DateTime<Utc>>,
}

/// Parse a `to` destination and return its canonical store-key form.
///
/// [`RouteRecord::key`] is always derived from `IpNetwork`'s `Display`,
/// which normalizes a bare host address to an explicit `/32` (v4) or
/// `/128` (v6) network. Any endpoint that looks a route up by `to` — not
/// just PUT, which builds a [`RouteRecord`] directly — must route the
/// client's literal through this same normalization before using it as a
/// store key, or a client that PUT `"192.168.1.24"` and later sends
/// `"192.168.1.24"` again on DELETE/PATCH/pause/activate will see a
/// spurious not-found against the `"192.168.1.24/32"` key PUT actually
/// stored.
pub fn normalize_to_key(to: &str) -> Result<String, ValidationError> {
    IpNetwork::from_str(to.trim())
        .map(|net| net.to_string())
        .map_err(|_| ValidationError::InvalidDestination(to.to_string()))
}

/// Validate and normalize a [`NewRouteInput`] into a [`ValidatedRoute`].
///
/// `known_interfaces` stands in for the host's interface inventory (in
/// production, read from `/proc/net/dev`; tests pass a fixed set).
pub fn validate_new_route(
    input: NewRouteInput,
    now: DateTime<Utc>,
    known_interfaces: &HashSet<String>,
) -> Result<ValidatedRoute, ValidationError> {
    let to = IpNetwork::from_str(input.to.trim())
        .map_err(|_| ValidationError::InvalidDestination(input.to.clone()))?;

    let via = match input.via.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(
            IpAddr::from_str(s).map_err(|_| ValidationError::InvalidGateway(s.to_string()))?,
        ),
        None => None,
    };

    let dev = input.dev.filter(|s| !s.is_empty());
    if via.is_none() && dev.is_none() {
        return Err(ValidationError::MissingViaOrDev);
    }
    if let Some(ref dev) = dev {
        if !known_interfaces.contains(dev.as_str()) {
            return Err(ValidationError::UnknownInterface(dev.clone()));
        }
    }

    let create_at = input.create_at.unwrap_or(now);

    if let Some(delete_at) = input.delete_at {
        if delete_at <= now {
            return Err(ValidationError::DeleteAtInPast { delete_at: delete_at.to_rfc3339() });
        }
        if delete_at < create_at {
            return Err(ValidationError::DeleteBeforeCreate {
                delete_at: delete_at.to_rfc3339(),
                create_at: create_at.to_rfc3339(),
            });
        }
    }

    Ok(ValidatedRoute { to, via, dev, create_at, delete_at: input.delete_at })
}

/// Raw, untrusted input for a PATCH request body. The target route's `to`
/// key travels separately, as the path parameter.
#[derive(Debug, Clone, Default)]
pub struct RoutePatchInput {
    pub via: Option<String>,
    pub dev: Option<String>,
    pub create_at: Option<DateTime<Utc>>,
    pub delete_at: Option<DateTime<Utc>>,
}

/// A validated patch: `via`/`dev` already resolved against the mutual
/// exclusion policy — at most one of the two is `Some` unless the patch
/// touched neither, in which case both are `None` and the store's prior
/// values are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePatch {
    pub via: Option<Option<IpAddr>>,
    pub dev: Option<Option<String>>,
    pub create_at: Option<DateTime<Utc>>,
    pub delete_at: Option<DateTime<Utc>>,
}

/// Validate a PATCH body and resolve the via/dev mutual-exclusion policy.
///
/// If `via` is set in the patch, also clear `dev`; if `dev` is set, also
/// clear `via`. When both are present in the same patch, `dev` wins: `via`
/// is cleared.
pub fn validate_route_patch(
    input: RoutePatchInput,
    known_interfaces: &HashSet<String>,
) -> Result<RoutePatch, ValidationError> {
    let via = match input.via.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => {
            Some(IpAddr::from_str(s).map_err(|_| ValidationError::InvalidGateway(s.to_string()))?)
        }
        None => None,
    };
    let dev = input.dev.filter(|s| !s.is_empty());
    if let Some(ref dev) = dev {
        if !known_interfaces.contains(dev.as_str()) {
            return Err(ValidationError::UnknownInterface(dev.clone()));
        }
    }

    let (via_field, dev_field) = if dev.is_some() {
        (Some(None), Some(dev))
    } else if via.is_some() {
        (Some(via), Some(None))
    } else {
        (None, None)
    };

    Ok(RoutePatch {
        via: via_field,
        dev: dev_field,
        create_at: input.create_at,
        delete_at: input.delete_at,
    })
}

#[cfg(test)]
#[path = "route_tests.rs"]
mod tests;
