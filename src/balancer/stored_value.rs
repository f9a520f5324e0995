// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stored-value balancer: boost documents by a number stored at index time.
//!
//! Ratings, citation counts, stock levels. The caller states the expected range
//! up front; values are clamped into it and rescaled linearly, so `range_min`
//! maps to `0` and `range_max` maps to `1`.

use super::{stored_value, validate_factor, Balancer};
use crate::error::{Error, Result};
use crate::types::{RawResult, Slot};

#[derive(Debug, Clone, PartialEq)]
pub struct StoredValueBalancer {
    factor: f64,
    slot: Slot,
    range_min: f64,
    range_max: f64,
}

impl StoredValueBalancer {
    /// Requires finite bounds with `range_min < range_max`.
    pub fn new(factor: f64, slot: Slot, range_min: f64, range_max: f64) -> Result<Self> {
        validate_factor(factor)?;
        if !range_min.is_finite() || !range_max.is_finite() {
            return Err(Error::configuration(format!(
                "stored value range {}..{} must be finite",
                range_min, range_max
            )));
        }
        if range_min >= range_max {
            return Err(Error::configuration(format!(
                "stored value range needs range_min < range_max, got {}..{}",
                range_min, range_max
            )));
        }
        Ok(Self {
            factor,
            slot,
            range_min,
            range_max,
        })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    /// Clamp into the range and rescale to `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.range_min, self.range_max);
        (clamped - self.range_min) / (self.range_max - self.range_min)
    }

    pub fn with_factor(&self, factor: f64) -> Result<Self> {
        Self::new(factor, self.slot, self.range_min, self.range_max)
    }

    pub fn with_slot(&self, slot: Slot) -> Result<Self> {
        Self::new(self.factor, slot, self.range_min, self.range_max)
    }
}

impl Balancer for StoredValueBalancer {
    fn factor(&self) -> f64 {
        self.factor
    }

    fn slot(&self) -> Slot {
        self.slot
    }

    fn signal(&self, doc: &RawResult) -> Result<f64> {
        let value = stored_value(doc, self.slot)?;
        let number = value
            .as_number()
            .filter(|n| n.is_finite())
            .ok_or_else(|| Error::parse(value.to_string(), "stored value is not a finite number"))?;
        Ok(self.normalize(number))
    }

    fn describe(&self) -> String {
        format!(
            "stored_value(slot {}, {}..{})",
            self.slot, self.range_min, self.range_max
        )
    }
}
