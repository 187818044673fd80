// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

//! Route-management handlers: the transactional request path that mutates
//! route intent while respecting window semantics and the single-writer
//! invariant against the kernel.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use route_actuator::ActuatorError;
use route_core::{
    classify_phase, normalize_to_key, validate_new_route, validate_route_patch, Clock,
    NewRouteInput, Phase, RoutePatchInput, RouteStatus,
};
use route_storage::RouteUpdate;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    DeletedRouteView, DeletedRoutesResponse, MessageResponse, PatchRouteRequest, PutRouteRequest,
    RouteView, RoutesResponse, ToBody,
};

/// GET `/routes`: union of store state and a snapshot of the kernel's
/// observed table.
pub async fn get_routes<C: Clock>(
    State(state): State<AppState<C>>,
) -> Result<Json<RoutesResponse>, ApiError> {
    let database_routes = state.store.list_active().into_iter().map(RouteView::from).collect();
    let dump = state.actuator.dump().await?;
    let system_routes = dump.lines().map(|line| line.trim().to_string()).collect();
    Ok(Json(RoutesResponse { database_routes, system_routes }))
}

/// GET `/routes/deleted`.
pub async fn get_deleted_routes<C: Clock>(
    State(state): State<AppState<C>>,
) -> Json<DeletedRoutesResponse> {
    let deleted_routes =
        state.store.list_deleted().into_iter().map(DeletedRouteView::from).collect();
    Json(DeletedRoutesResponse { deleted_routes })
}

/// PUT `/routes/`: classify the window against "now" and either persist a
/// pending/expired record or install-then-persist an active one,
/// short-circuiting to 200 when the kernel already has it.
pub async fn put_route<C: Clock>(
    State(state): State<AppState<C>>,
    Json(body): Json<PutRouteRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let now = state.clock.now();
    let input = NewRouteInput {
        to: body.to,
        via: body.via,
        dev: body.dev,
        create_at: body.create_at,
        delete_at: body.delete_at,
    };
    let validated = validate_new_route(input, now, &state.known_interfaces)?;
    let phase = classify_phase(validated.create_at, validated.delete_at, now);

    let success = (StatusCode::CREATED, Json(MessageResponse::new("Route successfully added or scheduled")));

    match phase {
        Phase::Pending => {
            state.store.insert(validated.into_record(false, RouteStatus::Pending))?;
            Ok(success)
        }
        Phase::Expired => {
            state.store.insert(validated.into_record(false, RouteStatus::Expired))?;
            Ok(success)
        }
        Phase::Active => {
            let to = validated.to;
            match state.actuator.install(&to, validated.via, validated.dev.as_deref()).await {
                Ok(()) => {
                    state.store.insert(validated.into_record(true, RouteStatus::Active))?;
                    Ok(success)
                }
                Err(ActuatorError::AlreadyExists) => Ok((
                    StatusCode::OK,
                    Json(MessageResponse::new(format!(
                        "A route to {to} already exists in the system"
                    ))),
                )),
                Err(other) => Err(other.into()),
            }
        }
    }
}

/// PATCH `/routes/`: overwrite the given fields, enforce via/dev mutual
/// exclusion, and reset to `pending`/`active=false` so the reconciler
/// re-derives the correct status on its next sweep.
pub async fn patch_route<C: Clock>(
    State(state): State<AppState<C>>,
    Json(body): Json<PatchRouteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let input = RoutePatchInput {
        via: body.via,
        dev: body.dev,
        create_at: body.create_at,
        delete_at: body.delete_at,
    };
    let patch = validate_route_patch(input, &state.known_interfaces)?;
    let key = normalize_to_key(&body.to)?;

    let update = RouteUpdate {
        via: patch.via,
        dev: patch.dev,
        create_at: patch.create_at,
        delete_at: patch.delete_at,
        active: Some(false),
        status: Some(RouteStatus::Pending),
    };
    state.store.update(&key, update)?;
    Ok(Json(MessageResponse::new(format!("Route {key} successfully updated"))))
}

/// DELETE `/routes/`.
pub async fn delete_route<C: Clock>(
    State(state): State<AppState<C>>,
    Json(body): Json<ToBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let key = normalize_to_key(&body.to)?;
    let prior = state.store.delete(&key, RouteStatus::Deleted)?;
    if prior.active {
        match state.actuator.remove(&prior.to).await {
            Ok(()) | Err(ActuatorError::NotPresent) => {}
            Err(other) => return Err(other.into()),
        }
    }
    Ok(Json(MessageResponse::new("Route successfully deleted")))
}

fn is_within_window(
    create_at: chrono::DateTime<chrono::Utc>,
    delete_at: Option<chrono::DateTime<chrono::Utc>>,
    now: chrono::DateTime<chrono::Utc>,
) -> bool {
    create_at <= now && delete_at.map_or(true, |d| d > now)
}

/// PATCH `/routes/pause`.
pub async fn pause_route<C: Clock>(
    State(state): State<AppState<C>>,
    Json(body): Json<ToBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let now = state.clock.now();
    let key = normalize_to_key(&body.to)?;
    let record = state.store.get(&key)?;

    if record.status != RouteStatus::Active
        || !record.active
        || !is_within_window(record.create_at, record.delete_at, now)
    {
        return Err(ApiError::Precondition {
            to: key,
            reason: "route is not currently active within its window",
        });
    }

    match state.actuator.remove(&record.to).await {
        Ok(()) | Err(ActuatorError::NotPresent) => {}
        Err(other) => return Err(other.into()),
    }
    state.store.update(&key, RouteUpdate::activation(false, RouteStatus::Paused))?;
    Ok(Json(MessageResponse::new(format!("Route {key} successfully paused"))))
}

/// PATCH `/routes/activate`.
pub async fn activate_route<C: Clock>(
    State(state): State<AppState<C>>,
    Json(body): Json<ToBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    let now = state.clock.now();
    let key = normalize_to_key(&body.to)?;
    let record = state.store.get(&key)?;

    if record.status != RouteStatus::Paused
        || record.active
        || !is_within_window(record.create_at, record.delete_at, now)
    {
        return Err(ApiError::Precondition {
            to: key,
            reason: "route is not currently paused or is out of its active window",
        });
    }

    match state.actuator.install(&record.to, record.via, record.dev.as_deref()).await {
        Ok(()) | Err(ActuatorError::AlreadyExists) => {}
        Err(other) => return Err(other.into()),
    }
    state.store.update(&key, RouteUpdate::activation(true, RouteStatus::Active))?;
    Ok(Json(MessageResponse::new(format!("Route {key} successfully re-activated"))))
}
