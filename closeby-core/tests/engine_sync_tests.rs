// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for engine::sync_engine
//!
//! One sync cycle at a time, driven by hand.

mod common;

use closeby_core::engine::*;
use closeby_core::registry::{MockRegistry, RegistryCall, RegistryError};
use closeby_core::{AppState, Coordinate, LifecycleSignal};
use common::{count_events, test_engine, FAR_AWAY, FIFTY_METERS_NORTH, HOME};

// ============================================================
// Foreground: all users
// ============================================================

#[test]
fn test_all_users_round_trip() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    let outcome = t
        .engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Ok(vec![
                Coordinate::new(43.1, 131.9),
                Coordinate::new(43.10045, 131.9),
            ])),
        )
        .unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::PeersRefreshed {
            peers: 2,
            nearest_distance_meters: Some(50.0),
        }
    );
    let state = t.engine.state();
    assert_eq!(state.nearest_distance_meters(), Some(50.0));
    assert!(state.is_overlapping());
    assert!(!state.last_sync_failed());
    assert!(state.peers()[0].is_self);
    assert!(!state.peers()[1].is_self);
    // Foreground never notifies.
    assert!(t.notifier.emitted().is_empty());
}

#[test]
fn test_per_peer_distances_and_markers() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Ok(vec![HOME, FIFTY_METERS_NORTH, FAR_AWAY])),
        )
        .unwrap();

    let thresholds = t.engine.config().thresholds;
    let peers = t.engine.state().peers();
    assert_eq!(peers[0].marker_kind(&thresholds), MarkerKind::SelfMarker);
    assert_eq!(peers[1].nearest_distance_meters, Some(50.0));
    assert_eq!(peers[1].marker_kind(&thresholds), MarkerKind::Overlapping);
    assert_eq!(peers[2].marker_kind(&thresholds), MarkerKind::Clear);
}

#[test]
fn test_alone_on_the_map_has_no_distance() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(request, SyncResponse::AllUsers(Ok(vec![HOME])))
        .unwrap();

    let state = t.engine.state();
    assert_eq!(state.peers().len(), 1);
    assert_eq!(state.nearest_distance_meters(), None);
    assert!(!state.is_overlapping());
}

#[test]
fn test_foreground_without_location_still_lists_users() {
    let mut t = test_engine(AppState::Foreground);

    let request = t.engine.begin_sync().unwrap();
    assert_eq!(request.location, None);
    t.engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Ok(vec![FIFTY_METERS_NORTH, FAR_AWAY])),
        )
        .unwrap();

    let state = t.engine.state();
    assert_eq!(state.peers().len(), 2);
    assert!(state.peers().iter().all(|p| !p.is_self));
    assert_eq!(state.nearest_distance_meters(), None);
}

#[test]
fn test_self_missing_from_response_falls_back_to_own_location() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Ok(vec![FIFTY_METERS_NORTH, FAR_AWAY])),
        )
        .unwrap();

    assert_eq!(t.engine.state().nearest_distance_meters(), Some(50.0));
}

#[test]
fn test_self_is_matched_against_the_location_sent() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    // A fresh fix lands while the request is pending.
    t.engine.update_location(FAR_AWAY);
    t.engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Ok(vec![HOME, FIFTY_METERS_NORTH])),
        )
        .unwrap();

    assert!(t.engine.state().peers()[0].is_self);
    assert_eq!(t.engine.state().nearest_distance_meters(), Some(50.0));
    assert_eq!(t.engine.state().self_location(), Some(FAR_AWAY));
}

// ============================================================
// Background: nearest distance
// ============================================================

#[test]
fn test_background_without_location_aborts_silently() {
    let mut t = test_engine(AppState::Background);
    let err = t.engine.begin_sync().unwrap_err();
    assert_eq!(err, EngineError::NoLocation);
    assert!(!t.engine.state().last_sync_failed());
    assert!(!t.engine.is_busy());
}

#[test]
fn test_background_sequence_fires_once() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    for meters in [80.0, 55.0, 40.0, 55.0] {
        let request = t.engine.begin_sync().unwrap();
        t.engine
            .complete_sync(request, SyncResponse::NearestDistance(Ok(meters)))
            .unwrap();
    }

    let emitted = t.notifier.emitted();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].id, "0");
    assert_eq!(emitted[0].title, "Too close!");
    assert_eq!(emitted[0].body, "40 meters to the nearest user");
    assert_eq!(
        count_events(&t.events, |e| matches!(e, EngineEvent::NotificationEmitted { .. })),
        1
    );
}

#[test]
fn test_identical_readings_do_not_refire() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    for _ in 0..5 {
        let request = t.engine.begin_sync().unwrap();
        t.engine
            .complete_sync(request, SyncResponse::NearestDistance(Ok(30.0)))
            .unwrap();
    }

    assert_eq!(t.notifier.emitted().len(), 1);
}

#[test]
fn test_background_distance_is_rounded() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    let outcome = t
        .engine
        .complete_sync(request, SyncResponse::NearestDistance(Ok(50.4)))
        .unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::DistanceUpdated {
            nearest_distance_meters: Some(50.0),
            notified: true,
        }
    );
}

#[test]
fn test_background_keeps_stale_peers() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);
    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(request, SyncResponse::AllUsers(Ok(vec![HOME, FAR_AWAY])))
        .unwrap();

    t.engine.apply_lifecycle(LifecycleSignal::Inactive);
    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(request, SyncResponse::NearestDistance(Ok(25.0)))
        .unwrap();

    let state = t.engine.state();
    assert_eq!(state.peers().len(), 2);
    assert_eq!(state.peers()[1].coordinate, FAR_AWAY);
    assert_eq!(state.nearest_distance_meters(), Some(25.0));
}

#[test]
fn test_infinite_background_distance_is_unknown() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);
    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(request, SyncResponse::NearestDistance(Ok(f64::INFINITY)))
        .unwrap();
    assert_eq!(t.engine.state().nearest_distance_meters(), None);
    assert!(!t.engine.state().is_overlapping());
}

#[test]
fn test_result_arriving_after_foregrounding_does_not_notify() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    t.engine.apply_lifecycle(LifecycleSignal::Active);
    t.engine
        .complete_sync(request, SyncResponse::NearestDistance(Ok(10.0)))
        .unwrap();

    assert!(t.notifier.emitted().is_empty());
    assert!(t.engine.state().is_overlapping());
}

// ============================================================
// Failures
// ============================================================

#[test]
fn test_failure_keeps_previous_derived_state() {
    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Ok(vec![HOME, FIFTY_METERS_NORTH])),
        )
        .unwrap();

    let request = t.engine.begin_sync().unwrap();
    let err = t
        .engine
        .complete_sync(
            request,
            SyncResponse::AllUsers(Err(RegistryError::Network("refused".into()))),
        )
        .unwrap_err();

    assert!(err.marks_failure());
    let state = t.engine.state();
    assert!(state.last_sync_failed());
    assert_eq!(state.peers().len(), 2);
    assert_eq!(state.nearest_distance_meters(), Some(50.0));
    assert!(!t.engine.is_busy());
}

#[test]
fn test_next_success_clears_failure() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    let _ = t.engine.complete_sync(
        request,
        SyncResponse::NearestDistance(Err(RegistryError::Protocol("garbage".into()))),
    );
    assert!(t.engine.state().last_sync_failed());

    let request = t.engine.begin_sync().unwrap();
    t.engine
        .complete_sync(request, SyncResponse::NearestDistance(Ok(100.0)))
        .unwrap();
    assert!(!t.engine.state().last_sync_failed());
}

#[test]
fn test_status_errors_mark_failure() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    let request = t.engine.begin_sync().unwrap();
    let _ = t.engine.complete_sync(
        request,
        SyncResponse::NearestDistance(Err(RegistryError::Status(503))),
    );
    assert!(t.engine.state().last_sync_failed());
    assert_eq!(
        count_events(&t.events, |e| matches!(e, EngineEvent::SyncFailed { .. })),
        1
    );
}

// ============================================================
// Busy flag
// ============================================================

#[test]
fn test_overlapping_tick_is_skipped() {
    let mut t = test_engine(AppState::Background);
    t.engine.update_location(HOME);

    let first = t.engine.begin_sync().unwrap();
    let before = t.engine.state().clone();

    assert_eq!(t.engine.begin_sync().unwrap_err(), EngineError::SyncInFlight);
    assert_eq!(t.engine.state(), &before);
    assert_eq!(
        count_events(&t.events, |e| matches!(e, EngineEvent::SyncSkipped)),
        1
    );

    t.engine
        .complete_sync(first, SyncResponse::NearestDistance(Ok(20.0)))
        .unwrap();
    assert_eq!(t.notifier.emitted().len(), 1);
    assert!(t.engine.begin_sync().is_ok());
}

// ============================================================
// Inline cycle against the mock registry
// ============================================================

#[tokio::test]
async fn test_sync_against_mock_registry() {
    let registry = MockRegistry::new();
    registry.set_all_users(vec![HOME, FIFTY_METERS_NORTH]);

    let mut t = test_engine(AppState::Foreground);
    t.engine.update_location(HOME);
    t.engine.sync(&registry).await.unwrap();

    assert!(t.engine.state().is_overlapping());
    assert_eq!(
        registry.calls(),
        vec![RegistryCall::AllUsers {
            user_id: "me".into(),
            location: Some(HOME),
        }]
    );
}

#[tokio::test]
async fn test_sync_surfaces_registry_error() {
    let registry = MockRegistry::new();
    registry.inject_error(RegistryError::Network("down".into()));

    let mut t = test_engine(AppState::Foreground);
    let err = t.engine.sync(&registry).await.unwrap_err();
    assert!(matches!(err, EngineError::Registry(RegistryError::Network(_))));
    assert!(t.engine.state().last_sync_failed());
}

#[test]
fn test_generated_user_ids_are_unique() {
    let a = SyncEngine::new(
        EngineConfig::default(),
        std::sync::Arc::new(closeby_core::MockNotificationSink::new()),
        std::sync::Arc::new(EventDispatcher::new()),
    );
    let b = SyncEngine::new(
        EngineConfig::default(),
        std::sync::Arc::new(closeby_core::MockNotificationSink::new()),
        std::sync::Arc::new(EventDispatcher::new()),
    );
    assert!(!a.state().self_id().is_empty());
    assert_ne!(a.state().self_id(), b.state().self_id());
}
