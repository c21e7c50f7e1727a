// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync Engine
//!
//! Owns the session state, runs the fixed-period sync against the peer
//! registry and publishes the result for the view layer.
//!
//! # Module Structure
//!
//! - [`state`] - Session state, peers and status indicators
//! - [`sync_engine`] - The reconciliation state machine
//! - [`runtime`] - Actor that drives the state machine on tokio
//! - `events` - Event system for callbacks
//! - `config` - Engine configuration
//! - `error` - Error types
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use closeby_core::engine::{spawn, EngineConfig, EventDispatcher, SyncEngine};
//!
//! let engine = SyncEngine::new(EngineConfig::default(), notifier, Arc::new(EventDispatcher::new()));
//! let (handle, _task) = spawn(engine, registry, &location_provider);
//!
//! handle.app_state_changed("background")?;
//! println!("{:?}", handle.state().nearest_distance_meters());
//! ```

mod config;
mod error;
mod events;
pub mod runtime;
pub mod state;
pub mod sync_engine;

pub use config::{EngineConfig, DEFAULT_POLL_INTERVAL};
pub use error::{EngineError, EngineResult};
pub use events::{CallbackHandler, EngineEvent, EventDispatcher, EventHandler, SyncMode};
pub use runtime::{spawn, EngineHandle, LocationProvider, LocationSink, NoLocationProvider};
pub use state::{MarkerKind, PeerSample, SessionState, StatusIndicator};
pub use sync_engine::{SyncEngine, SyncOutcome, SyncRequest, SyncResponse};
