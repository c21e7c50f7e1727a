//! Nearest Command
//!
//! One-shot "distance to nearest user" query.

use anyhow::{Context, Result};
use closeby_core::geo::{finite, round_meters};
use closeby_core::{classify, Coordinate, RegistryClient};

use super::spinner;
use crate::config::CliConfig;
use crate::display;

/// Queries the registry and prints the nearest distance.
pub async fn run(config: &CliConfig, lat: f64, lon: f64) -> Result<()> {
    let client = config.registry_client()?;
    let user_id = config.user_id();

    let pb = spinner("Asking registry...");
    let result = client
        .fetch_nearest_distance(&user_id, Some(Coordinate::new(lat, lon)))
        .await;
    pb.finish_and_clear();

    let meters = result.with_context(|| format!("Registry query to {} failed", config.registry_url))?;

    match finite(round_meters(meters)) {
        Some(d) => println!(
            "{} ({})",
            display::meters(Some(d)),
            display::level(classify(Some(d)))
        ),
        None => display::info("No other users registered"),
    }
    Ok(())
}
