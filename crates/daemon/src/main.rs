// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

// Route daemon entry point: wires the store, the kernel actuator, the
// clock, and the HTTP layer together, then spawns the lifecycle reconciler
// as a dedicated background task alongside the HTTP server.
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod auth;
mod config;
mod error;
mod http;
mod interfaces;
mod reconciler;
mod state;

use std::sync::Arc;

use route_actuator::IpRouteActuator;
use route_core::SystemClock;
use route_storage::RouteStore;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(Config::from_env()?);
    info!(port = config.port, database_url = %config.database_url.display(), "starting route daemon");

    let clock = SystemClock;
    let store = Arc::new(RouteStore::open(&config.database_url, clock)?);
    let actuator: Arc<dyn route_actuator::KernelActuator> = Arc::new(IpRouteActuator);
    let known_interfaces = Arc::new(interfaces::discover_interfaces());

    let state = AppState { store: store.clone(), actuator: actuator.clone(), clock, config: config.clone(), known_interfaces };

    let shutdown = CancellationToken::new();
    let reconciler_handle = reconciler::spawn(
        store,
        actuator,
        clock,
        std::time::Duration::from_secs(config.route_check_interval_secs),
        shutdown.clone(),
    );

    let app = http::router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(addr = %listener.local_addr()?, "route daemon listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    reconciler_handle.await?;
    info!("route daemon stopped");
    Ok(())
}

/// Waits for SIGINT/SIGTERM and cancels the shared shutdown token so the
/// reconciler stops between sweeps rather than mid-sweep.
///
/// Failure to install a signal handler is an unrecoverable startup defect,
/// not a runtime condition to propagate.
#[allow(clippy::expect_used)]
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    shutdown.cancel();
}
