// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! The lifecycle reconciler: a single long-running task that periodically
//! converges persisted intent with kernel state by applying the
//! expire/activate/no-op transition table to every record in the store.

use std::sync::Arc;

use route_actuator::{ActuatorError, KernelActuator};
use route_core::{Clock, RouteRecord, RouteStatus};
use route_storage::{RouteStore, RouteUpdate};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One sweep over the store's live records, applying the transition table
/// below. Records are processed independently — an error on one (an
/// idempotency signal, or a store write racing a concurrent API call) is
/// logged and does not abort the sweep.
pub async fn sweep<C: Clock>(store: &RouteStore<C>, actuator: &dyn KernelActuator, now: chrono::DateTime<chrono::Utc>) {
    for record in store.list_active() {
        reconcile_one(store, actuator, &record, now).await;
    }
}

async fn reconcile_one<C: Clock>(
    store: &RouteStore<C>,
    actuator: &dyn KernelActuator,
    record: &RouteRecord,
    now: chrono::DateTime<chrono::Utc>,
) {
    let expired = record.delete_at.is_some_and(|d| d <= now);

    // T1: window closed and not already recorded as expired.
    if expired && record.status != RouteStatus::Expired {
        if record.status != RouteStatus::Paused {
            match actuator.remove(&record.to).await {
                Ok(()) => info!(to = %record.to, "removed expired route from kernel"),
                Err(ActuatorError::NotPresent) => {
                    debug!(to = %record.to, "expired route already absent from kernel")
                }
                Err(err) => warn!(to = %record.to, %err, "failed to remove expired route from kernel"),
            }
        }
        match store.delete(&record.key(), RouteStatus::Expired) {
            Ok(_) => info!(to = %record.to, "expired route removed from store"),
            Err(err) => {
                debug!(to = %record.to, %err, "expired route vanished from store before sweep could remove it")
            }
        }
        return;
    }

    // T2: window open, not yet installed, not paused.
    let in_window = record.create_at <= now && !expired;
    if in_window && !record.active && record.status != RouteStatus::Paused {
        match actuator.install(&record.to, record.via, record.dev.as_deref()).await {
            Ok(()) => info!(to = %record.to, "installed scheduled route into kernel"),
            Err(ActuatorError::AlreadyExists) => {
                debug!(to = %record.to, "scheduled route already installed in kernel")
            }
            Err(err) => {
                warn!(to = %record.to, %err, "failed to install scheduled route into kernel");
                return;
            }
        }
        let update = RouteUpdate::activation(true, RouteStatus::Active);
        if let Err(err) = store.update(&record.key(), update) {
            debug!(to = %record.to, %err, "route vanished from store before sweep could activate it");
        } else {
            info!(to = %record.to, "route activated in store");
        }
    }

    // T3: otherwise, no-op.
}

/// Spawn the reconciler as a dedicated background task: sleeps `interval`
/// between sweeps and honors `shutdown` between sweeps, never mid-sweep —
/// a sweep in progress always runs to completion.
pub fn spawn<C: Clock + 'static>(
    store: Arc<RouteStore<C>>,
    actuator: Arc<dyn KernelActuator>,
    clock: C,
    interval: std::time::Duration,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = clock.now();
                    sweep(&store, actuator.as_ref(), now).await;
                }
                _ = shutdown.cancelled() => {
                    info!("reconciler shutting down between sweeps");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
