// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! The only component permitted to mutate host kernel routing state.
//! `IpRouteActuator` shells out to `ip route` via `tokio::process::Command`.

use std::net::IpAddr;

use async_trait::async_trait;
use ipnetwork::IpNetwork;
use tokio::process::Command;
use tracing::debug;

use crate::error::ActuatorError;

const ALREADY_EXISTS_MARKER: &str = "RTNETLINK answers: File exists";
const NOT_PRESENT_MARKERS: [&str; 2] = ["No such process", "Cannot find device"];

/// Installs/removes/dumps routes in the host kernel routing table.
///
/// Synchronous from the caller's perspective and performs no retries — the
/// reconciler and the route-management API are responsible for deciding
/// how to react to a failure.
#[async_trait]
pub trait KernelActuator: Send + Sync {
    /// Add a route for `to` via the given gateway and/or device. Must
    /// distinguish an already-installed route ([`ActuatorError::AlreadyExists`])
    /// from a genuine failure, so callers can treat the former idempotently.
    async fn install(
        &self,
        to: &IpNetwork,
        via: Option<IpAddr>,
        dev: Option<&str>,
    ) -> Result<(), ActuatorError>;

    /// Remove the route whose destination matches `to`.
    async fn remove(&self, to: &IpNetwork) -> Result<(), ActuatorError>;

    /// Raw textual listing of the kernel's routing table (`ip route show`),
    /// for the caller to split into trimmed lines.
    async fn dump(&self) -> Result<String, ActuatorError>;
}

/// Map `ip route add`'s stderr to the distinct idempotency signal or a
/// generic command failure.
fn classify_install_failure(stderr: &str) -> ActuatorError {
    if stderr.contains(ALREADY_EXISTS_MARKER) {
        return ActuatorError::AlreadyExists;
    }
    ActuatorError::CommandFailed { stderr: stderr.to_string() }
}

/// Map `ip route del`'s stderr to the distinct idempotency signal or a
/// generic command failure.
fn classify_remove_failure(stderr: &str) -> ActuatorError {
    if NOT_PRESENT_MARKERS.iter().any(|marker| stderr.contains(marker)) {
        return ActuatorError::NotPresent;
    }
    ActuatorError::CommandFailed { stderr: stderr.to_string() }
}

/// Production actuator backed by the `ip` command from iproute2.
#[derive(Debug, Clone, Default)]
pub struct IpRouteActuator;

impl IpRouteActuator {
    async fn run(&self, args: &[&str]) -> Result<std::process::Output, ActuatorError> {
        Command::new("ip")
            .args(args)
            .output()
            .await
            .map_err(|e| ActuatorError::Io(e.to_string()))
    }
}

#[async_trait]
impl KernelActuator for IpRouteActuator {
    async fn install(
        &self,
        to: &IpNetwork,
        via: Option<IpAddr>,
        dev: Option<&str>,
    ) -> Result<(), ActuatorError> {
        let to_str = to.to_string();
        let mut args = vec!["route", "add", "to", to_str.as_str()];
        let via_str;
        if let Some(via) = via {
            via_str = via.to_string();
            args.push("via");
            args.push(via_str.as_str());
        }
        if let Some(dev) = dev {
            args.push("dev");
            args.push(dev);
        }

        let output = self.run(&args).await?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let err = classify_install_failure(&stderr);
        if matches!(err, ActuatorError::AlreadyExists) {
            debug!(to = %to_str, "route already installed, treating as success");
        }
        Err(err)
    }

    async fn remove(&self, to: &IpNetwork) -> Result<(), ActuatorError> {
        let to_str = to.to_string();
        let output = self.run(&["route", "del", "to", to_str.as_str()]).await?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let err = classify_remove_failure(&stderr);
        if matches!(err, ActuatorError::NotPresent) {
            debug!(to = %to_str, "route already absent, treating as success");
        }
        Err(err)
    }

    async fn dump(&self) -> Result<String, ActuatorError> {
        let output = self.run(&["route", "show"]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ActuatorError::CommandFailed { stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
