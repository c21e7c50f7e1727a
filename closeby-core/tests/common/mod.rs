// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common Test Utilities
//!
//! Shared helpers, fixtures, and utilities used across test modules.
//! This module provides reusable test infrastructure to reduce duplication.

#![allow(dead_code)]

pub mod strategies;

use std::sync::{Arc, Mutex};

use closeby_core::engine::{
    CallbackHandler, EngineConfig, EngineEvent, EventDispatcher, SyncEngine,
};
use closeby_core::{AppState, Coordinate, MockNotificationSink};

/// Self position used by the fixtures.
pub const HOME: Coordinate = Coordinate::new(43.1, 131.9);

/// A point 0.00045 degrees north of `HOME`, about 50 meters away.
pub const FIFTY_METERS_NORTH: Coordinate = Coordinate::new(43.10045, 131.9);

/// A point far away from `HOME`.
pub const FAR_AWAY: Coordinate = Coordinate::new(43.2, 132.0);

/// Engine plus the collaborators a test wants to inspect.
pub struct TestEngine {
    pub engine: SyncEngine,
    pub notifier: Arc<MockNotificationSink>,
    pub events: Arc<Mutex<Vec<EngineEvent>>>,
}

/// Builds an engine with id "me" in the given initial lifecycle state.
pub fn test_engine(initial: AppState) -> TestEngine {
    test_engine_with_config(EngineConfig::default().with_initial_state(initial))
}

/// Builds an engine with id "me" and a custom configuration.
pub fn test_engine_with_config(config: EngineConfig) -> TestEngine {
    let notifier = Arc::new(MockNotificationSink::new());
    let (dispatcher, events) = recording_dispatcher();
    let engine = SyncEngine::with_user_id("me", config, notifier.clone(), dispatcher);
    TestEngine {
        engine,
        notifier,
        events,
    }
}

/// Dispatcher that records every event it sees.
pub fn recording_dispatcher() -> (Arc<EventDispatcher>, Arc<Mutex<Vec<EngineEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(CallbackHandler::new(move |event| {
        sink.lock().unwrap().push(event);
    })));
    (Arc::new(dispatcher), events)
}

/// Counts recorded events matching `pred`.
pub fn count_events(
    events: &Arc<Mutex<Vec<EngineEvent>>>,
    pred: impl Fn(&EngineEvent) -> bool,
) -> usize {
    events.lock().unwrap().iter().filter(|e| pred(e)).count()
}
