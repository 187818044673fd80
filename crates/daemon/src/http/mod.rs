// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! HTTP surface wiring: builds the `axum::Router`, layering bearer auth
//! and request tracing over the route-management handlers.

pub mod dto;
pub mod handlers;

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod handlers_tests;

use axum::routing::{get, patch, put};
use axum::Router;
use route_core::Clock;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full router, with the bearer-auth middleware applied to every
/// route via `axum::middleware::from_fn_with_state`.
pub fn router<C: Clock + 'static>(state: AppState<C>) -> Router {
    let api_token = state.config.api_token.clone();

    Router::new()
        .route("/routes", get(handlers::get_routes::<C>))
        .route("/routes/", put(handlers::put_route::<C>))
        .route("/routes/", patch(handlers::patch_route::<C>))
        .route("/routes/", axum::routing::delete(handlers::delete_route::<C>))
        .route("/routes/pause", patch(handlers::pause_route::<C>))
        .route("/routes/activate", patch(handlers::activate_route::<C>))
        .route("/routes/deleted", get(handlers::get_deleted_routes::<C>))
        .layer(axum::middleware::from_fn_with_state(
            api_token,
            crate::auth::require_bearer_token,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
