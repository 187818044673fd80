// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! The only component permitted to mutate host kernel routing state: a
//! trait plus a production `ip route` adapter and, behind the `testing`
//! feature, an in-memory fake for the reconciler/API tests.
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod kernel;

#[cfg(feature = "testing")]
pub mod fake;

pub use error::ActuatorError;
pub use kernel::{IpRouteActuator, KernelActuator};

#[cfg(feature = "testing")]
pub use fake::FakeActuator;
