// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow between the Retrieval Engine and the ranking core.
//!
//! Everything the engine hands over is read-only input (`RawResult`,
//! `StoredValue`); everything the core hands back is a fresh output record
//! (`ScoredResult`, `ResultSet`). No string-keyed dictionaries: a result has a
//! docid, a weight, its stored fields, and its slot values, and that's it.
//!
//! # Invariants
//!
//! - **RawResult**: `raw_weight ∈ [0, 1]` as delivered by the engine. The mixer
//!   clamps anything else and logs it.
//! - **ScoredResult**: `weight ∈ [0, 1]`, and the first result of a non-empty
//!   set has weight exactly `1.0` unless every combined weight was zero.

use crate::facets::FacetTable;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Slot number: where a per-document value is stored, distinct from text fields.
pub type Slot = u32;

/// A value stored for a document in a slot.
///
/// Numeric slots hold numbers; string slots hold text such as a
/// `"latitude:longitude"` coordinate. Serialized untagged, so JSON `42` and
/// `"51.5:-0.1"` both deserialize naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Number(f64),
    Text(String),
}

impl StoredValue {
    /// Numeric view: numbers as-is, text parsed as a float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StoredValue::Number(n) => Some(*n),
            StoredValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoredValue::Number(_) => None,
            StoredValue::Text(s) => Some(s),
        }
    }
}

impl From<f64> for StoredValue {
    fn from(n: f64) -> Self {
        StoredValue::Number(n)
    }
}

impl From<&str> for StoredValue {
    fn from(s: &str) -> Self {
        StoredValue::Text(s.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(s: String) -> Self {
        StoredValue::Text(s)
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Number(n) => write!(f, "{}", n),
            StoredValue::Text(s) => f.write_str(s),
        }
    }
}

/// One matching document as returned by the Retrieval Engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    /// Engine-internal document number (not the user-defined id field).
    pub docid: u64,
    /// Text relevance in `[0, 1]`.
    pub raw_weight: f64,
    /// Stored fields: each field may hold several values.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
    /// Slot values the balancers read.
    #[serde(default)]
    pub values: BTreeMap<Slot, StoredValue>,
}

impl RawResult {
    pub fn new(docid: u64, raw_weight: f64) -> Self {
        Self {
            docid,
            raw_weight,
            fields: BTreeMap::new(),
            values: BTreeMap::new(),
        }
    }

    /// Attach a stored field value (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Attach a slot value (builder style).
    pub fn with_value(mut self, slot: Slot, value: impl Into<StoredValue>) -> Self {
        self.values.insert(slot, value.into());
        self
    }

    pub fn value(&self, slot: Slot) -> Option<&StoredValue> {
        self.values.get(&slot)
    }

    /// First stored value of a field, the common case for display.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.first().map(String::as_str)
    }
}

/// A ranked result: the engine's record plus its final weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    #[serde(flatten)]
    pub raw: RawResult,
    /// Final weight in `[0, 1]` after mixing and rescaling.
    pub weight: f64,
}

impl ScoredResult {
    pub fn docid(&self) -> u64 {
        self.raw.docid
    }
}

/// Identifies a facet table: boolean facets by field name, numeric facets by slot.
///
/// JSON object keys are always strings, so a key that spells a slot number
/// (`"4"`, not `"04"` or `"+4"`) deserializes as a slot. The same goes for
/// `From<&str>`. That keeps a serialized `ResultSet.facets` map round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum FacetKey {
    Slot(Slot),
    Field(String),
}

impl FacetKey {
    fn from_name(name: String) -> Self {
        match name.parse::<Slot>() {
            Ok(slot) if slot.to_string() == name => FacetKey::Slot(slot),
            _ => FacetKey::Field(name),
        }
    }
}

impl<'de> Deserialize<'de> for FacetKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Slot(Slot),
            Name(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Slot(slot) => FacetKey::Slot(slot),
            Repr::Name(name) => FacetKey::from_name(name),
        })
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetKey::Slot(slot) => write!(f, "{}", slot),
            FacetKey::Field(name) => f.write_str(name),
        }
    }
}

impl From<Slot> for FacetKey {
    fn from(slot: Slot) -> Self {
        FacetKey::Slot(slot)
    }
}

impl From<&str> for FacetKey {
    fn from(name: &str) -> Self {
        FacetKey::from_name(name.to_string())
    }
}

/// Window into the ranked list: skip `offset`, keep at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    pub const ALL: Page = Page {
        offset: 0,
        limit: usize::MAX,
    };

    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::ALL
    }
}

/// What a search hands back: one page of ranked results plus facets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    /// Results on this page, best first.
    pub results: Vec<ScoredResult>,
    /// Results that passed the threshold, before paging.
    pub match_count: usize,
    /// Results on this page (`results.len()`).
    pub item_count: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<FacetKey, FacetTable>,
}
