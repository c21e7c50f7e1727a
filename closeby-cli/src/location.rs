//! Terminal Location Providers
//!
//! Stand-ins for a platform location service: a fixed position or a
//! scripted route replayed at a fixed step.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use closeby_core::engine::{LocationProvider, LocationSink};
use closeby_core::Coordinate;

/// Reports one fixed position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    fn current_position(&self, sink: LocationSink) {
        sink.deliver(self.0);
    }

    fn watch_position(&self, _sink: LocationSink) {}
}

/// Replays a list of positions, one per step, then holds the last one.
#[derive(Debug, Clone)]
pub struct ScriptedRoute {
    points: Vec<Coordinate>,
    step: Duration,
}

impl ScriptedRoute {
    pub fn new(points: Vec<Coordinate>, step: Duration) -> Self {
        ScriptedRoute { points, step }
    }
}

impl LocationProvider for ScriptedRoute {
    fn current_position(&self, sink: LocationSink) {
        if let Some(first) = self.points.first() {
            sink.deliver(*first);
        }
    }

    fn watch_position(&self, sink: LocationSink) {
        let points = self.points.clone();
        let step = self.step;
        tokio::spawn(async move {
            for point in points.into_iter().skip(1) {
                tokio::time::sleep(step).await;
                if !sink.deliver(point) {
                    break;
                }
            }
        });
    }
}

/// Parses `"lat,lon;lat,lon;..."`.
pub fn parse_route(route: &str) -> Result<Vec<Coordinate>> {
    let points = route
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_point)
        .collect::<Result<Vec<_>>>()?;

    if points.is_empty() {
        bail!("Route is empty");
    }
    Ok(points)
}

fn parse_point(point: &str) -> Result<Coordinate> {
    let (lat, lon) = point
        .split_once(',')
        .with_context(|| format!("Expected 'lat,lon', got '{}'", point))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude in '{}'", point))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude in '{}'", point))?;

    let coordinate = Coordinate::new(lat, lon);
    if !coordinate.is_finite() {
        bail!("Non-finite coordinate '{}'", point);
    }
    Ok(coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let points = parse_route("43.1,131.9; 43.10045,131.9;").unwrap();
        assert_eq!(
            points,
            vec![Coordinate::new(43.1, 131.9), Coordinate::new(43.10045, 131.9)]
        );
    }

    #[test]
    fn test_parse_route_negative() {
        let points = parse_route("-33.9,-70.6").unwrap();
        assert_eq!(points, vec![Coordinate::new(-33.9, -70.6)]);
    }

    #[test]
    fn test_parse_route_errors() {
        assert!(parse_route("").is_err());
        assert!(parse_route("43.1").is_err());
        assert!(parse_route("43.1,east").is_err());
        assert!(parse_route("NaN,1").is_err());
    }
}
