// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Route Daemon Contributors

use super::*;
use chrono::{Duration, TimeZone};
use std::collections::HashSet;
use yare::parameterized;

fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn interfaces(names: &[&str]) -> HashSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[parameterized(
    pending = { ymd(2030, 1, 1), Some(ymd(2030, 2, 1)), ymd(2029, 1, 1), Phase::Pending },
    active_no_delete = { ymd(2026, 1, 1), None, ymd(2026, 6, 1), Phase::Active },
    active_with_future_delete = { ymd(2026, 1, 1), Some(ymd(2026, 6, 1)), ymd(2026, 3, 1), Phase::Active },
    expired = { ymd(2026, 1, 1), Some(ymd(2026, 2, 1)), ymd(2026, 3, 1), Phase::Expired },
    expired_exactly_at_boundary = { ymd(2026, 1, 1), Some(ymd(2026, 2, 1)), ymd(2026, 2, 1), Phase::Expired },
    pending_exactly_at_boundary_is_active = { ymd(2026, 1, 1), None, ymd(2026, 1, 1), Phase::Active },
)]
fn classify_phase_cases(
    create_at: DateTime<Utc>,
    delete_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    expected: Phase,
) {
    assert_eq!(classify_phase(create_at, delete_at, now), expected);
}

#[test]
fn validate_new_route_requires_via_or_dev() {
    let now = ymd(2026, 1, 1);
    let input = NewRouteInput { to: "10.0.0.0/24".into(), ..Default::default() };
    let err = validate_new_route(input, now, &HashSet::new()).unwrap_err();
    assert_eq!(err, ValidationError::MissingViaOrDev);
}

#[test]
fn validate_new_route_rejects_unknown_interface() {
    let now = ymd(2026, 1, 1);
    let input = NewRouteInput {
        to: "10.0.0.0/24".into(),
        dev: Some("eth9".into()),
        ..Default::default()
    };
    let err = validate_new_route(input, now, &interfaces(&["eth0"])).unwrap_err();
    assert_eq!(err, ValidationError::UnknownInterface("eth9".into()));
}

#[test]
fn validate_new_route_rejects_invalid_destination() {
    let now = ymd(2026, 1, 1);
    let input = NewRouteInput {
        to: "not-an-ip".into(),
        dev: Some("eth0".into()),
        ..Default::default()
    };
    let err = validate_new_route(input, now, &interfaces(&["eth0"])).unwrap_err();
    assert_eq!(err, ValidationError::InvalidDestination("not-an-ip".into()));
}

#[test]
fn validate_new_route_rejects_delete_at_in_past() {
    let now = ymd(2026, 6, 1);
    let input = NewRouteInput {
        to: "10.0.0.0/24".into(),
        dev: Some("eth0".into()),
        delete_at: Some(ymd(2026, 1, 1)),
        ..Default::default()
    };
    let err = validate_new_route(input, now, &interfaces(&["eth0"])).unwrap_err();
    assert!(matches!(err, ValidationError::DeleteAtInPast { .. }));
}

#[test]
fn validate_new_route_rejects_delete_before_create() {
    let now = ymd(2026, 1, 1);
    let input = NewRouteInput {
        to: "10.0.0.0/24".into(),
        dev: Some("eth0".into()),
        create_at: Some(ymd(2026, 6, 1)),
        delete_at: Some(ymd(2026, 3, 1)),
        ..Default::default()
    };
    let err = validate_new_route(input, now, &interfaces(&["eth0"])).unwrap_err();
    assert!(matches!(err, ValidationError::DeleteBeforeCreate { .. }));
}

#[test]
fn validate_new_route_defaults_create_at_to_now() {
    let now = ymd(2026, 1, 1);
    let input = NewRouteInput {
        to: "10.0.0.0/24".into(),
        via: Some("10.0.0.1".into()),
        ..Default::default()
    };
    let validated = validate_new_route(input, now, &HashSet::new()).unwrap();
    assert_eq!(validated.create_at, now);
    assert_eq!(validated.dev, None);
}

#[test]
fn validate_new_route_treats_empty_strings_as_absent() {
    let now = ymd(2026, 1, 1);
    let input = NewRouteInput {
        to: "10.0.0.0/24".into(),
        via: Some(String::new()),
        dev: Some("eth0".into()),
        ..Default::default()
    };
    let validated = validate_new_route(input, now, &interfaces(&["eth0"])).unwrap();
    assert_eq!(validated.via, None);
    assert_eq!(validated.dev, Some("eth0".into()));
}

#[test]
fn patch_setting_dev_clears_via() {
    let input = RoutePatchInput { dev: Some("eth1".into()), ..Default::default() };
    let patch = validate_route_patch(input, &interfaces(&["eth1"])).unwrap();
    assert_eq!(patch.via, Some(None));
    assert_eq!(patch.dev, Some(Some("eth1".into())));
}

#[test]
fn patch_setting_via_clears_dev() {
    let input = RoutePatchInput { via: Some("10.0.0.9".into()), ..Default::default() };
    let patch = validate_route_patch(input, &HashSet::new()).unwrap();
    assert_eq!(patch.dev, Some(None));
    assert!(matches!(patch.via, Some(Some(_))));
}

#[test]
fn patch_setting_both_dev_wins_per_via_before_dev_order() {
    let input = RoutePatchInput {
        via: Some("10.0.0.9".into()),
        dev: Some("eth2".into()),
        ..Default::default()
    };
    let patch = validate_route_patch(input, &interfaces(&["eth2"])).unwrap();
    assert_eq!(patch.via, Some(None));
    assert_eq!(patch.dev, Some(Some("eth2".into())));
}

#[test]
fn patch_touching_neither_leaves_both_fields_untouched() {
    let input = RoutePatchInput {
        delete_at: Some(ymd(2030, 1, 1)),
        ..Default::default()
    };
    let patch = validate_route_patch(input, &HashSet::new()).unwrap();
    assert_eq!(patch.via, None);
    assert_eq!(patch.dev, None);
    assert_eq!(patch.delete_at, Some(ymd(2030, 1, 1)));
}

#[test]
fn route_record_key_matches_to_string() {
    let validated = validate_new_route(
        NewRouteInput {
            to: "192.168.1.0/24".into(),
            via: Some("192.168.1.1".into()),
            ..Default::default()
        },
        ymd(2026, 1, 1),
        &HashSet::new(),
    )
    .unwrap();
    let record = validated.into_record(true, RouteStatus::Active);
    assert_eq!(record.key(), "192.168.1.0/24");
}

#[test]
fn route_status_display_matches_serde_rename() {
    assert_eq!(RouteStatus::Pending.to_string(), "pending");
    assert_eq!(RouteStatus::Paused.to_string(), "paused");
}

#[test]
fn delete_at_equal_to_create_at_is_accepted() {
    let now = ymd(2020, 1, 1);
    let create_at = ymd(2030, 1, 1);
    let input = NewRouteInput {
        to: "10.0.0.0/24".into(),
        via: Some("10.0.0.1".into()),
        create_at: Some(create_at),
        delete_at: Some(create_at + Duration::seconds(0)),
        ..Default::default()
    };
    let validated = validate_new_route(input, now, &HashSet::new()).unwrap();
    assert_eq!(validated.delete_at, Some(create_at));
}
