//! Distance Command
//!
//! Offline great-circle distance between two points.

use anyhow::{bail, Result};
use closeby_core::geo::round_meters;
use closeby_core::{classify, distance_meters, Coordinate};

use crate::display;

/// Prints the distance between two points and its classification.
pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<()> {
    let a = Coordinate::new(lat1, lon1);
    let b = Coordinate::new(lat2, lon2);
    if !a.is_finite() || !b.is_finite() {
        bail!("Coordinates must be finite numbers");
    }

    let meters = round_meters(distance_meters(a, b));
    println!(
        "{} ({})",
        display::meters(Some(meters)),
        display::level(classify(Some(meters)))
    );
    Ok(())
}
