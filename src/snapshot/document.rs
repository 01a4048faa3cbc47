//! Published document shapes
//!
//! One [`SnapshotDocument`] is serialized wholesale per tick. When encoding
//! fails the tick publishes a [`FallbackDocument`] instead; both paths meet
//! in [`EncodeOutcome`], which the publish step consumes uniformly.

use crate::error::EncodeError;
use crate::types::Scn;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Point-in-time snapshot of relay progress and statistics.
///
/// Field names are the wire contract polled by monitoring agents; keys are
/// sorted so unchanged state serializes to an identical document.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SnapshotDocument {
    /// Latest SCN per producer, all producers ever seen
    pub producer: BTreeMap<String, Scn>,
    /// Latest SCN per currently-connected peer; `null` for a peer that has
    /// not reported yet
    pub client: BTreeMap<String, Option<Scn>>,
    /// Transport-level request handling totals, sampled as-is
    pub http: Value,
    /// Inbound event totals, sampled as-is
    pub inbound: Value,
    /// Outbound event totals, sampled as-is
    pub outbound: Value,
}

/// Minimal document published when a tick fails to encode.
///
/// Pollers must treat this as "metrics temporarily unavailable", not as a
/// protocol error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FallbackDocument {
    status: &'static str,
    class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl FallbackDocument {
    /// Describe a failed encode pass.
    #[must_use]
    pub fn from_error(err: &EncodeError) -> Self {
        let detail = err.detail();
        Self {
            status: "exception",
            class: err.kind(),
            message: (!detail.is_empty()).then_some(detail),
        }
    }
}

/// Outcome of one encode pass.
///
/// Success and failure are both ordinary values here; nothing error-shaped
/// crosses the tick boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// The full snapshot serialized cleanly
    Published(String),
    /// Encoding failed; the serialized fallback document takes its place
    Fallback(String),
    /// Even the fallback could not be serialized; the empty string is
    /// published as an explicit degraded state
    Degraded,
}

impl EncodeOutcome {
    /// The string to publish for this tick.
    #[must_use]
    pub fn into_document(self) -> String {
        match self {
            Self::Published(json) | Self::Fallback(json) => json,
            Self::Degraded => String::new(),
        }
    }

    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
