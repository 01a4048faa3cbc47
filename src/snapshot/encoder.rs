//! Scheduled snapshot encoding
//!
//! The encoder is the single reader of the SCN maps and the single writer
//! of the published-document slot. Each tick builds one document from the
//! current state and the relay's live view, then publishes it atomically;
//! a failed tick publishes the fallback document and the schedule carries
//! on regardless.

use crate::error::EncodeError;
use crate::relay::RelayStats;
use crate::snapshot::document::{EncodeOutcome, FallbackDocument, SnapshotDocument};
use crate::snapshot::state::SnapshotState;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Builds and publishes one document per scheduled tick.
pub struct SnapshotEncoder {
    state: SnapshotState,
    relay: Arc<dyn RelayStats>,
    publish_tx: watch::Sender<String>,
}

impl SnapshotEncoder {
    /// Create an encoder reading `state` and `relay`, publishing into the
    /// given slot.
    #[must_use]
    pub fn new(
        state: SnapshotState,
        relay: Arc<dyn RelayStats>,
        publish_tx: watch::Sender<String>,
    ) -> Self {
        Self {
            state,
            relay,
            publish_tx,
        }
    }

    /// Run one encode pass and return its outcome without publishing.
    #[must_use]
    pub fn encode_tick(&self) -> EncodeOutcome {
        let encoded = self
            .build_document()
            .and_then(|document| serde_json::to_string(&document).map_err(EncodeError::from));

        match encoded {
            Ok(json) => EncodeOutcome::Published(json),
            Err(err) => {
                warn!("snapshot encode failed: {}", err);
                Self::fallback_outcome(&err)
            }
        }
    }

    fn build_document(&self) -> Result<SnapshotDocument, EncodeError> {
        // Connectivity membership decides which clients appear; a connected
        // peer that never reported shows up as null rather than being
        // omitted.
        let client: BTreeMap<String, Option<crate::types::Scn>> = self
            .relay
            .peers()
            .into_iter()
            .map(|peer| {
                let scn = self.state.lookup_client_scn(&peer);
                (peer, scn)
            })
            .collect();

        Ok(SnapshotDocument {
            producer: self.state.snapshot_producers(),
            client,
            http: self.relay.http_totals()?,
            inbound: self.relay.inbound_totals()?,
            outbound: self.relay.outbound_totals()?,
        })
    }

    fn fallback_outcome(err: &EncodeError) -> EncodeOutcome {
        match serde_json::to_string(&FallbackDocument::from_error(err)) {
            Ok(json) => EncodeOutcome::Fallback(json),
            Err(fallback_err) => {
                error!(
                    "fallback document failed to serialize, publishing empty document: {}",
                    fallback_err
                );
                EncodeOutcome::Degraded
            }
        }
    }

    /// Tick once: encode and atomically publish the result.
    ///
    /// Publishing replaces the slot wholesale; readers observe either the
    /// previous complete document or this one, never a torn value.
    pub fn run_once(&self) {
        let outcome = self.encode_tick();
        let document = outcome.into_document();
        debug!("publishing snapshot document ({} bytes)", document.len());
        self.publish_tx.send_replace(document);
    }

    /// Spawn the fixed-cadence loop. The first tick fires immediately; the
    /// cadence is never reconfigured afterwards.
    ///
    /// The loop stops when the shutdown signal fires; no tick outcome ever
    /// breaks it.
    pub(crate) fn spawn(
        self,
        refresh_interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh_interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => self.run_once(),
                    _ = shutdown_rx.changed() => {
                        debug!("snapshot encoder stopping");
                        break;
                    }
                }
            }
        })
    }
}
