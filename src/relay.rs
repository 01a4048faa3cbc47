//! Relay-facing seam
//!
//! The snapshot core does not own connection management or the statistics
//! collectors; it reads both through this trait once per encoder tick.

use crate::error::EncodeError;
use serde_json::Value;
use std::collections::HashSet;

/// Read-only view of the relay sampled by the encoder.
///
/// Implemented by the embedding relay. All methods are called at most once
/// per tick from the single encoder task; implementations must be cheap and
/// must not block, since a slow sample delays the whole tick.
pub trait RelayStats: Send + Sync + 'static {
    /// Identifiers of the clients currently connected to the relay.
    ///
    /// The returned set is a point-in-time copy; membership decides which
    /// clients appear in the published document, regardless of whether they
    /// have reported an SCN yet.
    fn peers(&self) -> HashSet<String>;

    /// Current transport-level request handling totals.
    fn http_totals(&self) -> Result<Value, EncodeError>;

    /// Current inbound event totals.
    fn inbound_totals(&self) -> Result<Value, EncodeError>;

    /// Current outbound event totals.
    fn outbound_totals(&self) -> Result<Value, EncodeError>;
}
