// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! In-memory stand-in for [`crate::kernel::IpRouteActuator`], so reconciler
//! and HTTP handler tests can exercise idempotency signals without shelling
//! out to `ip`. Backs the trait with a `parking_lot::Mutex`-guarded
//! in-memory set.

use std::collections::HashSet;
use std::net::IpAddr;

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use parking_lot::Mutex;

use crate::error::ActuatorError;
use crate::kernel::KernelActuator;

/// An in-memory "kernel routing table": a set of installed destinations.
#[derive(Default)]
pub struct FakeActuator {
    installed: Mutex<HashSet<String>>,
}

impl FakeActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `to` is currently tracked as installed.
    pub fn contains(&self, to: &IpNetwork) -> bool {
        self.installed.lock().contains(&to.to_string())
    }

    /// Number of routes currently tracked as installed.
    pub fn len(&self) -> usize {
        self.installed.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KernelActuator for FakeActuator {
    async fn install(
        &self,
        to: &IpNetwork,
        _via: Option<IpAddr>,
        _dev: Option<&str>,
    ) -> Result<(), ActuatorError> {
        let mut installed = self.installed.lock();
        if !installed.insert(to.to_string()) {
            return Err(ActuatorError::AlreadyExists);
        }
        Ok(())
    }

    async fn remove(&self, to: &IpNetwork) -> Result<(), ActuatorError> {
        let mut installed = self.installed.lock();
        if !installed.remove(&to.to_string()) {
            return Err(ActuatorError::NotPresent);
        }
        Ok(())
    }

    async fn dump(&self) -> Result<String, ActuatorError> {
        let installed = self.installed.lock();
        let mut lines: Vec<&str> = installed.iter().map(String::as_str).collect();
        lines.sort_unstable();
        Ok(lines.join("\n"))
    }
}
