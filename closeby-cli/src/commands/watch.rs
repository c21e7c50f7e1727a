//! Watch Command
//!
//! Runs the proximity engine in the terminal. Lifecycle signals are read
//! from stdin, one per line (`active`, `background`, ...).

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::json;

use closeby_core::engine::{CallbackHandler, NoLocationProvider};
use closeby_core::{
    spawn, AppState, Coordinate, EngineConfig, EngineEvent, EngineHandle, EventDispatcher,
    LocationProvider, Notification, NotificationSink, ProximityThresholds, SyncEngine,
};

use crate::config::CliConfig;
use crate::display;
use crate::location::{parse_route, FixedLocation, ScriptedRoute};

/// Options for `closeby watch`.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub location: Option<(f64, f64)>,
    pub route: Option<String>,
    pub step: Duration,
    pub background: bool,
    pub json: bool,
}

/// Notification sink writing to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    json: bool,
}

impl TerminalNotifier {
    pub fn new(json: bool) -> Self {
        TerminalNotifier { json }
    }
}

impl NotificationSink for TerminalNotifier {
    fn emit(&self, notification: Notification) {
        if self.json {
            println!("{}", json!({ "event": "notification", "notification": notification }));
        } else {
            display::notification(&notification);
        }
    }

    fn clear_all(&self) {
        if self.json {
            println!("{}", json!({ "event": "notifications_cleared" }));
        } else {
            display::info("Notifications cleared");
        }
    }
}

fn print_event(event: EngineEvent, json: bool, thresholds: &ProximityThresholds) {
    if json {
        let line = match event {
            EngineEvent::StateChanged { state } => json!({ "event": "state", "state": state }),
            EngineEvent::SyncFailed { error } => json!({ "event": "sync_failed", "error": error }),
            EngineEvent::LifecycleChanged { state } => {
                json!({ "event": "lifecycle", "foreground": state == AppState::Foreground })
            }
            EngineEvent::LocationError { message } => {
                json!({ "event": "location_error", "message": message })
            }
            _ => return,
        };
        println!("{}", line);
        return;
    }

    match event {
        EngineEvent::StateChanged { state } => display::state_line(&state, thresholds),
        EngineEvent::SyncFailed { error } => display::warning(&format!("Sync failed: {}", error)),
        EngineEvent::LifecycleChanged { state } => match state {
            AppState::Foreground => display::info("App in foreground"),
            AppState::Background => display::info("App in background"),
        },
        EngineEvent::LocationError { message } => {
            display::warning(&format!("Location error: {}", message))
        }
        _ => {}
    }
}

fn location_provider(options: &WatchOptions) -> Result<Box<dyn LocationProvider>> {
    if let Some(route) = &options.route {
        let points = parse_route(route).context("Invalid --route")?;
        return Ok(Box::new(ScriptedRoute::new(points, options.step)));
    }
    Ok(match options.location {
        Some((lat, lon)) => Box::new(FixedLocation(Coordinate::new(lat, lon))),
        None => Box::new(NoLocationProvider),
    })
}

/// Forwards stdin lines as lifecycle signals until EOF.
///
/// Runs on its own thread: a blocking stdin read would hold up runtime
/// shutdown.
fn forward_lifecycle(handle: EngineHandle) {
    for line in std::io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let signal = line.trim();
        if signal.is_empty() {
            continue;
        }
        if handle.app_state_changed(signal).is_err() {
            break;
        }
    }
}

/// Runs the engine until Ctrl-C.
pub async fn run(config: &CliConfig, options: WatchOptions) -> Result<()> {
    let client = config.registry_client()?;
    let provider = location_provider(&options)?;

    let initial = if options.background {
        AppState::Background
    } else {
        AppState::Foreground
    };
    let engine_config = EngineConfig::default().with_initial_state(initial);
    let thresholds = engine_config.thresholds;

    let json = options.json;
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_handler(Arc::new(CallbackHandler::new(move |event| {
        print_event(event, json, &thresholds)
    })));

    let engine = SyncEngine::with_user_id(
        config.user_id(),
        engine_config,
        Arc::new(TerminalNotifier::new(json)),
        Arc::new(dispatcher),
    );

    if !json {
        display::info(&format!(
            "Watching {} as {} (Ctrl-C to stop)",
            config.registry_url,
            engine.state().self_id()
        ));
    }

    let (handle, task) = spawn(engine, Arc::new(client), provider.as_ref());
    let stdin_handle = handle.clone();
    std::thread::spawn(move || forward_lifecycle(stdin_handle));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    handle.shutdown().ok();
    task.await.context("Engine task failed")?;

    if !json {
        display::success("Stopped");
    }
    Ok(())
}
