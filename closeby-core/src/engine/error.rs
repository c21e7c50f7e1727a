// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Engine Error Types

use thiserror::Error;

use crate::registry::RegistryError;

/// Errors surfaced by a sync cycle.
///
/// None of these stop the engine. Registry failures set the session's
/// `last_sync_failed` flag; the others skip the cycle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Registry call failed (network or protocol).
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The current mode needs a location fix and none is available.
    #[error("no location available")]
    NoLocation,

    /// A previous sync has not resolved yet.
    #[error("sync already in flight")]
    SyncInFlight,

    /// A response arrived for a request that is not the one in flight.
    #[error("stale sync response: {0}")]
    StaleResponse(u64),

    /// The engine task has stopped.
    #[error("engine stopped")]
    Stopped,
}

impl EngineError {
    /// Returns true if this error marks the session as failed.
    pub fn marks_failure(&self) -> bool {
        matches!(self, EngineError::Registry(_))
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
