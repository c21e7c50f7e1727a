//! Display Helpers
//!
//! Terminal output formatting and styling.

use console::{style, StyledObject};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use closeby_core::engine::MarkerKind;
use closeby_core::{Notification, ProximityLevel, ProximityThresholds, SessionState, StatusIndicator};

/// Prints a success message.
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Prints a warning message.
pub fn warning(msg: &str) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Prints an info message.
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Styles a proximity level by severity.
pub fn level(level: ProximityLevel) -> StyledObject<&'static str> {
    let text = style(level.as_str());
    match level {
        ProximityLevel::Critical => text.red().bold(),
        ProximityLevel::Warning => text.yellow().bold(),
        ProximityLevel::Safe => text.green(),
        ProximityLevel::Unknown => text.dim(),
    }
}

/// Formats an optional distance in whole meters.
pub fn meters(distance: Option<f64>) -> String {
    match distance {
        Some(d) => format!("{:.0} m", d),
        None => "-".to_string(),
    }
}

/// Prints a proximity notification.
pub fn notification(notification: &Notification) {
    println!(
        "{} {} {}",
        style("🔔").bold(),
        style(&notification.title).red().bold(),
        notification.body
    );
}

/// Prints a one-line summary of the session state and its indicators.
pub fn state_line(state: &SessionState, thresholds: &ProximityThresholds) {
    let mode = if state.is_foreground() {
        style("fg").cyan()
    } else {
        style("bg").magenta()
    };

    let indicators: Vec<String> = state
        .status_indicators(thresholds)
        .into_iter()
        .map(|indicator| match indicator {
            StatusIndicator::LocationUnknown => style("location unknown").dim().to_string(),
            StatusIndicator::NearestUser {
                distance_meters,
                level: l,
            } => format!("nearest {} ({})", meters(Some(distance_meters)), level(l)),
            StatusIndicator::ConnectionError => style("connection error").red().to_string(),
        })
        .collect();

    println!(
        "[{}] peers={} {}",
        mode,
        state.peers().len(),
        indicators.join(", ")
    );
}

#[derive(Tabled)]
struct PeerRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Latitude")]
    latitude: f64,
    #[tabled(rename = "Longitude")]
    longitude: f64,
    #[tabled(rename = "Nearest")]
    nearest: String,
    #[tabled(rename = "Marker")]
    marker: String,
}

fn marker(kind: MarkerKind) -> String {
    match kind {
        MarkerKind::SelfMarker => style("you").cyan().bold().to_string(),
        MarkerKind::Overlapping => style("overlapping").red().to_string(),
        MarkerKind::Clear => style("clear").green().to_string(),
    }
}

/// Displays the peer list as a table.
pub fn peers_table(state: &SessionState, thresholds: &ProximityThresholds) {
    let rows: Vec<PeerRow> = state
        .peers()
        .iter()
        .enumerate()
        .map(|(i, peer)| PeerRow {
            index: i + 1,
            latitude: peer.coordinate.latitude,
            longitude: peer.coordinate.longitude,
            nearest: meters(peer.nearest_distance_meters),
            marker: marker(peer.marker_kind(thresholds)),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
