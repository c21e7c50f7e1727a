// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry Wire Protocol
//!
//! Request parameters and response parsing, independent of the HTTP client.
//!
//! - `GET /all-users?userId=..&latitude=..&longitude=..` returns a JSON
//!   array of `[latitude, longitude]` pairs.
//! - `GET /distance-to-nearest-user?..` returns a bare number: kilometers.

use serde_json::Value;

use super::error::{RegistryError, RegistryResult};
use crate::geo::{Coordinate, METERS_PER_KM};

/// Path of the "all users" endpoint.
pub const ALL_USERS_PATH: &str = "all-users";

/// Path of the "distance to nearest user" endpoint.
pub const NEAREST_DISTANCE_PATH: &str = "distance-to-nearest-user";

/// Builds the query string parameters for either endpoint.
///
/// Latitude and longitude are omitted when no location is known yet.
pub fn query_params(user_id: &str, location: Option<Coordinate>) -> Vec<(&'static str, String)> {
    let mut params = vec![("userId", user_id.to_string())];
    if let Some(location) = location {
        params.push(("latitude", location.latitude.to_string()));
        params.push(("longitude", location.longitude.to_string()));
    }
    params
}

/// Parses an "all users" body into coordinates, preserving order.
pub fn parse_all_users(body: &str) -> RegistryResult<Vec<Coordinate>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| RegistryError::Protocol(format!("invalid JSON: {}", e)))?;

    let entries = value
        .as_array()
        .ok_or_else(|| RegistryError::Protocol("expected a list of coordinate pairs".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_pair(entry).ok_or_else(|| bad_pair(i, entry)))
        .collect()
}

fn parse_pair(entry: &Value) -> Option<Coordinate> {
    let pair = entry.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    let coordinate = Coordinate::new(pair[0].as_f64()?, pair[1].as_f64()?);
    coordinate.is_finite().then_some(coordinate)
}

fn bad_pair(index: usize, entry: &Value) -> RegistryError {
    RegistryError::Protocol(format!(
        "entry {} is not a numeric [latitude, longitude] pair: {}",
        index, entry
    ))
}

/// Parses a "distance to nearest user" body and converts it to meters.
///
/// An infinite value means nobody else is registered and is passed through.
pub fn parse_distance_meters(body: &str) -> RegistryResult<f64> {
    let text = body.trim();
    let km: f64 = text
        .parse()
        .map_err(|_| RegistryError::Protocol(format!("not a number: {:?}", text)))?;

    if km.is_nan() || km < 0.0 {
        return Err(RegistryError::Protocol(format!("invalid distance: {}", text)));
    }

    Ok(km * METERS_PER_KM)
}
