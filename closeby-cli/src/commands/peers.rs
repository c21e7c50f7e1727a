//! Peers Command
//!
//! One-shot "all users" query, run through the engine so distances and
//! markers match what the app shows.

use std::sync::Arc;

use anyhow::{Context, Result};
use closeby_core::{AppState, Coordinate, EngineConfig, EventDispatcher, SyncEngine};

use super::spinner;
use super::watch::TerminalNotifier;
use crate::config::CliConfig;
use crate::display;

/// Fetches every user and prints them with nearest distances.
pub async fn run(config: &CliConfig, location: Option<(f64, f64)>, json: bool) -> Result<()> {
    let client = config.registry_client()?;
    let engine_config = EngineConfig::default().with_initial_state(AppState::Foreground);
    let thresholds = engine_config.thresholds;

    let mut engine = SyncEngine::with_user_id(
        config.user_id(),
        engine_config,
        Arc::new(TerminalNotifier::new(json)),
        Arc::new(EventDispatcher::new()),
    );
    if let Some((lat, lon)) = location {
        engine.update_location(Coordinate::new(lat, lon));
    }

    let pb = spinner("Fetching users...");
    let result = engine.sync(&client).await;
    pb.finish_and_clear();
    result.with_context(|| format!("Registry query to {} failed", config.registry_url))?;

    let state = engine.state();
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    if state.peers().is_empty() {
        display::warning("No users registered");
        return Ok(());
    }

    display::peers_table(state, &thresholds);
    display::state_line(state, &thresholds);
    Ok(())
}
