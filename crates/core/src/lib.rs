// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Domain types shared by the route store, the kernel actuator, and the
//! daemon: the route record and its lifecycle, validation of untrusted
//! input, and the injectable clock used to make time-based transitions
//! deterministic in tests.
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod clock;
pub mod deleted;
pub mod error;
pub mod route;

pub use clock::{Clock, FakeClock, SystemClock};
pub use deleted::DeletedRecord;
pub use error::ValidationError;
pub use route::{
    classify_phase, normalize_to_key, validate_new_route, validate_route_patch, NewRouteInput,
    Phase, RoutePatch, RoutePatchInput, RouteRecord, RouteStatus, ValidatedRoute,
};
