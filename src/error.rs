// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One error type for the whole crate.
//!
//! Configuration problems surface when a `Query` or balancer is built, never
//! halfway through a search. `MissingSignal` is the odd one out: it describes a
//! single document that lacks a value for a balancer's slot, and the mixer
//! recovers from it locally (zero contribution) instead of returning it.
//!
//! | Variant           | Raised by                                          |
//! |-------------------|----------------------------------------------------|
//! | `Parse`           | `"lat:lon"` strings, numeric facet values, range text |
//! | `Configuration`   | query/balancer construction                        |
//! | `InvalidArgument` | facet range builders                               |
//! | `MissingSignal`   | balancer signal lookup (recovered in the mixer)    |
//! | `ReadConfig`, `DecodeConfig` | JSON request/result/facet files         |

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Text that should have been a coordinate, number, or range was not.
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// A query or balancer was configured with values it cannot work with.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// A facet range builder was called with unusable arguments.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A document has no stored value in the slot a balancer reads.
    #[error("document {docid} has no value in slot {slot}")]
    MissingSignal { docid: u64, slot: u32 },

    #[error("failed to read {path:?}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}")]
    DecodeConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    /// True for errors that only affect one document and can be recovered.
    pub fn is_per_document(&self) -> bool {
        matches!(self, Error::MissingSignal { .. } | Error::Parse { .. })
    }
}
