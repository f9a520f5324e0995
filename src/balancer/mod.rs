// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Balancers: secondary signals mixed into text relevance.
//!
//! A balancer reads one stored value per document (a coordinate, a rating, a
//! citation count) and turns it into a normalized contribution in `[0, 1]`,
//! where higher is more desirable. The mixer multiplies that by the balancer's
//! factor and adds it to the text weight. The mixer only ever sees
//! `dyn Balancer`, so a new kind of signal is a new impl, not a mixer change.
//!
//! Balancers are immutable once built. Changing a factor or slot goes through
//! `with_factor`/`with_slot`, which validate and return a new instance, so a
//! search in flight never observes a half-reconfigured balancer. Everything a
//! balancer derives from its configuration (the distance balancer's centre in
//! radians, for one) is computed in the constructor and never touched again,
//! which is what makes `Arc<dyn Balancer>` safe to share across searches.
//!
//! # Missing signals
//!
//! A document without a usable value in the balancer's slot contributes `0`.
//! `signal` reports why; `contribution` swallows it with a debug log. One odd
//! document never fails the result set.

mod distance;
mod stored_value;

pub use distance::{distance_score, DistanceBalancer, DISTANCE_SCALE_METRES};
pub use stored_value::StoredValueBalancer;

use crate::error::{Error, Result};
use crate::types::{RawResult, Slot, StoredValue};
use std::fmt;
use tracing::debug;

/// A scoring unit that converts a stored per-document signal into a contribution.
pub trait Balancer: fmt::Debug + Send + Sync {
    /// Multiplier applied to the normalized contribution.
    fn factor(&self) -> f64;

    /// Slot the signal is read from.
    fn slot(&self) -> Slot;

    /// Normalized contribution in `[0, 1]`, or why this document has none.
    fn signal(&self, doc: &RawResult) -> Result<f64>;

    /// Short description used in query plan output.
    fn describe(&self) -> String;

    /// Normalized contribution with per-document failures recovered to `0`.
    fn contribution(&self, doc: &RawResult) -> f64 {
        match self.signal(doc) {
            Ok(value) if value.is_nan() => 0.0,
            Ok(value) => value.clamp(0.0, 1.0),
            Err(err) => {
                debug!(
                    docid = doc.docid,
                    slot = self.slot(),
                    error = %err,
                    "balancer signal unavailable, contributing 0"
                );
                0.0
            }
        }
    }

    /// `factor × contribution`: what actually gets added to the combined weight.
    fn weighted_contribution(&self, doc: &RawResult) -> f64 {
        self.factor() * self.contribution(doc)
    }
}

/// Factors live in `[0, 1]`, like the query's balance factor, so a combined
/// weight is bounded by `1 + balancers.len()` and never overflows.
pub(crate) fn validate_factor(factor: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&factor) {
        return Err(Error::configuration(format!(
            "balancer factor must be between 0.0 and 1.0, got {}",
            factor
        )));
    }
    Ok(())
}

pub(crate) fn stored_value(doc: &RawResult, slot: Slot) -> Result<&StoredValue> {
    doc.value(slot).ok_or(Error::MissingSignal {
        docid: doc.docid,
        slot,
    })
}
