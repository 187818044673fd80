// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! The durable route map: an in-memory authoritative store with
//! snapshot-file persistence, guarded by a single mutex so every operation
//! in the route store's contract is atomic.
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod persistence;
pub mod store;

pub use error::{PersistError, StoreError};
pub use persistence::{load_snapshot, save_snapshot, Snapshot, CURRENT_SNAPSHOT_VERSION};
pub use store::{RouteStore, RouteUpdate};
