// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Process-wide application state: the store handle, the actuator, the
//! clock, and the configuration, wired together once at startup and passed
//! as an explicit dependency into both the HTTP layer and the reconciler.
//! No dynamic rebinding — just constructor injection.

use std::collections::HashSet;
use std::sync::Arc;

use route_actuator::KernelActuator;
use route_core::Clock;
use route_storage::RouteStore;

use crate::config::Config;

/// Shared state cloned into every handler and the reconciler task.
///
/// Generic over the clock implementation so production code runs with
/// [`route_core::SystemClock`] and tests substitute [`route_core::FakeClock`]
/// without duplicating handler logic.
pub struct AppState<C: Clock> {
    pub store: Arc<RouteStore<C>>,
    pub actuator: Arc<dyn KernelActuator>,
    pub clock: C,
    pub config: Arc<Config>,
    /// Interfaces considered valid for a route's `dev` field. In production
    /// this is populated from the host's interface inventory at startup; in
    /// tests it is a fixed set.
    pub known_interfaces: Arc<HashSet<String>>,
}

impl<C: Clock> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            actuator: self.actuator.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            known_interfaces: self.known_interfaces.clone(),
        }
    }
}
