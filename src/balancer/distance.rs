// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Distance balancer: nearer documents weigh more.
//!
//! Documents store their location in a string slot as `"latitude:longitude"`.
//! The balancer measures the haversine distance to its centre and maps it
//! through a hyperbolic decay:
//!
//! ```text
//! score(d) = 1 / (1 + d / DISTANCE_SCALE_METRES)
//! ```
//!
//! | Distance | Score |
//! |----------|-------|
//! | 0 m      | 1.000 |
//! | 1 km     | 0.909 |
//! | 10 km    | 0.500 |
//! | 50 km    | 0.167 |
//! | 500 km   | 0.020 |
//!
//! Strictly decreasing, never zero, and still telling 30 km from 40 km apart.
//! With factor `1.0` and a text balance factor of `0.0`, results come back in
//! plain distance order.

use super::{stored_value, validate_factor, Balancer};
use crate::error::{Error, Result};
use crate::geo::{central_angle, LatLong, EARTH_RADIUS_METRES};
use crate::types::{RawResult, Slot};

/// Distance at which the score halves.
pub const DISTANCE_SCALE_METRES: f64 = 10_000.0;

/// Normalized score for a distance in metres.
pub fn distance_score(metres: f64) -> f64 {
    1.0 / (1.0 + metres.max(0.0) / DISTANCE_SCALE_METRES)
}

/// Weights documents by their distance from a fixed centre point.
#[derive(Debug, Clone)]
pub struct DistanceBalancer {
    factor: f64,
    slot: Slot,
    centre: LatLong,
    // Derived once from `centre`; the per-document math reuses them.
    centre_phi: f64,
    centre_cos_phi: f64,
}

impl DistanceBalancer {
    /// Centre given as degrees; `-90 ≤ latitude ≤ 90`, `-180 ≤ longitude ≤ 180`.
    pub fn new(factor: f64, slot: Slot, latitude: f64, longitude: f64) -> Result<Self> {
        validate_factor(factor)?;
        let centre = LatLong::new(latitude, longitude)?;
        let centre_phi = centre.latitude.to_radians();
        Ok(Self {
            factor,
            slot,
            centre,
            centre_phi,
            centre_cos_phi: centre_phi.cos(),
        })
    }

    /// Centre given as a `"latitude:longitude"` string.
    pub fn from_lat_long(factor: f64, slot: Slot, lat_long: &str) -> Result<Self> {
        let centre: LatLong = lat_long.parse()?;
        Self::new(factor, slot, centre.latitude, centre.longitude)
    }

    pub fn centre(&self) -> LatLong {
        self.centre
    }

    /// Metres from the centre to the given point. For display, not scoring.
    pub fn distance_from(&self, latitude: f64, longitude: f64) -> f64 {
        central_angle(
            self.centre_phi,
            self.centre_cos_phi,
            latitude.to_radians(),
            (longitude - self.centre.longitude).to_radians(),
        ) * EARTH_RADIUS_METRES
    }

    /// Metres from the centre to a `"latitude:longitude"` point.
    pub fn distance_from_lat_long(&self, lat_long: &str) -> Result<f64> {
        let point: LatLong = lat_long.parse()?;
        Ok(self.distance_from(point.latitude, point.longitude))
    }

    /// Same centre and slot, new factor.
    pub fn with_factor(&self, factor: f64) -> Result<Self> {
        Self::new(factor, self.slot, self.centre.latitude, self.centre.longitude)
    }

    /// Same centre and factor, new slot.
    pub fn with_slot(&self, slot: Slot) -> Result<Self> {
        Self::new(self.factor, slot, self.centre.latitude, self.centre.longitude)
    }
}

impl Balancer for DistanceBalancer {
    fn factor(&self) -> f64 {
        self.factor
    }

    fn slot(&self) -> Slot {
        self.slot
    }

    fn signal(&self, doc: &RawResult) -> Result<f64> {
        let value = stored_value(doc, self.slot)?;
        let text = value
            .as_text()
            .ok_or_else(|| Error::parse(value.to_string(), "expected \"latitude:longitude\" text"))?;
        let metres = self.distance_from_lat_long(text)?;
        Ok(distance_score(metres))
    }

    fn describe(&self) -> String {
        format!("distance(slot {}, from {})", self.slot, self.centre)
    }
}
