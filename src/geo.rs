// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Great-circle distance between two points on Earth.
//!
//! The Earth is modelled as a perfect sphere and altitude is ignored, so the
//! distances are as-the-crow-flies approximations. Good enough for "nearest
//! coffee shop", not for surveying.
//!
//! Coordinates travel through the system as `"{latitude}:{longitude}"` strings
//! (that's how documents store them in a slot), so parsing lives here too.
//! Malformed strings are an error, never a silent zero distance.
//!
//! # Properties
//!
//! - `haversine_distance(a, b) == haversine_distance(b, a)`
//! - `haversine_distance(a, a) == 0`
//! - Monotonically increasing with the central angle between the points

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Haversine distance in metres between two points given in degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    central_angle(phi1, phi1.cos(), phi2, (lon2 - lon1).to_radians()) * EARTH_RADIUS_METRES
}

/// Central angle in radians, with the first point's cosine supplied by the caller.
///
/// Split out so a balancer can precompute its centre once and reuse it for
/// every document.
pub(crate) fn central_angle(phi1: f64, cos_phi1: f64, phi2: f64, delta_lambda: f64) -> f64 {
    let half_dphi = ((phi2 - phi1) / 2.0).sin();
    let half_dlambda = (delta_lambda / 2.0).sin();
    let h = half_dphi * half_dphi + cos_phi1 * phi2.cos() * half_dlambda * half_dlambda;
    // Rounding can push h a hair past 1 for antipodal points.
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// A latitude/longitude pair in degrees.
///
/// Both constructors check the bounds. `LatLong::new` reports a violation as a
/// `Configuration` error; `FromStr` reports it as `Parse`, since a parsed
/// coordinate is usually stored document data and fails per document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLong {
    /// Build a coordinate, rejecting anything outside `[-90, 90] × [-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        match out_of_bounds(latitude, longitude) {
            Some(reason) => Err(Error::configuration(reason)),
            None => Ok(Self {
                latitude,
                longitude,
            }),
        }
    }

    /// Distance in metres to another coordinate.
    pub fn distance_to(&self, other: &LatLong) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl FromStr for LatLong {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (lat, lon) = trimmed
            .split_once(':')
            .ok_or_else(|| Error::parse(s, "expected \"latitude:longitude\""))?;
        if lon.contains(':') {
            return Err(Error::parse(s, "more than one ':' separator"));
        }

        let latitude = parse_degrees(s, lat, "latitude")?;
        let longitude = parse_degrees(s, lon, "longitude")?;
        if let Some(reason) = out_of_bounds(latitude, longitude) {
            return Err(Error::parse(s, reason));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

fn out_of_bounds(latitude: f64, longitude: f64) -> Option<String> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Some(format!(
            "latitude {} is outside [{}, {}]",
            latitude, MIN_LATITUDE, MAX_LATITUDE
        ));
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Some(format!(
            "longitude {} is outside [{}, {}]",
            longitude, MIN_LONGITUDE, MAX_LONGITUDE
        ));
    }
    None
}

fn parse_degrees(input: &str, part: &str, what: &str) -> Result<f64> {
    let value: f64 = part
        .trim()
        .parse()
        .map_err(|_| Error::parse(input, format!("{} {:?} is not a number", what, part)))?;
    if !value.is_finite() {
        return Err(Error::parse(input, format!("{} must be finite", what)));
    }
    Ok(value)
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.latitude, self.longitude)
    }
}
