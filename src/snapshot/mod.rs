//! Periodic snapshot collection and publication
//!
//! Writer tasks record per-producer and per-client sequence markers into
//! [`SnapshotState`]; a single scheduled [`SnapshotEncoder`] task folds that
//! state together with the relay's live peer set and statistics totals into
//! one JSON document per tick, published atomically for
//! [`SnapshotPublisher`] readers. [`SnapshotCollector`] owns the wiring and
//! the task lifetime.

mod document;
mod encoder;
mod publisher;
mod state;

pub use document::{EncodeOutcome, FallbackDocument, SnapshotDocument};
pub use encoder::SnapshotEncoder;
pub use publisher::SnapshotPublisher;
pub use state::SnapshotState;

use crate::config::{ConfigError, SnapshotConfig};
use crate::relay::RelayStats;
use crate::types::Scn;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

/// Owner of the snapshot pipeline: shared SCN state, the scheduled encoder
/// task, and the published-document slot.
///
/// Construction starts the schedule; the first tick runs immediately and
/// the cadence is fixed for the collector's lifetime. Dropping the
/// collector (or calling [`shutdown`](Self::shutdown)) stops scheduling
/// further ticks; an in-flight tick completes or is abandoned.
pub struct SnapshotCollector {
    state: SnapshotState,
    publisher: SnapshotPublisher,
    shutdown_tx: watch::Sender<bool>,
    encoder_task: JoinHandle<()>,
}

impl SnapshotCollector {
    /// Validate the configuration and start the encoder schedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        config: SnapshotConfig,
        relay: Arc<dyn RelayStats>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = SnapshotState::new(config.scn_policy);
        let (document_tx, document_rx) = watch::channel(String::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let encoder = SnapshotEncoder::new(state.clone(), relay, document_tx);
        let encoder_task = encoder.spawn(config.refresh_interval, shutdown_rx);
        info!(
            "snapshot collector started (refresh interval {}s, {} policy)",
            config.refresh_interval.as_secs(),
            config.scn_policy
        );

        Ok(Self {
            state,
            publisher: SnapshotPublisher::new(document_rx, config.refresh_interval),
            shutdown_tx,
            encoder_task,
        })
    }

    /// Cloneable writer handle for relay tasks recording progress.
    #[must_use]
    pub fn state(&self) -> SnapshotState {
        self.state.clone()
    }

    /// Cloneable reader facade for the transport layer.
    #[must_use]
    pub fn publisher(&self) -> SnapshotPublisher {
        self.publisher.clone()
    }

    /// Record the latest SCN generated by a producer.
    pub fn record_producer_scn(&self, producer: &str, scn: Scn) {
        self.state.record_producer_scn(producer, scn);
    }

    /// Record the latest SCN acknowledged or requested by a client.
    pub fn record_client_scn(&self, client: &str, scn: Scn) {
        self.state.record_client_scn(client, scn);
    }

    /// Last published JSON document; empty string before the first tick.
    #[must_use]
    pub fn current_document(&self) -> String {
        self.publisher.current_document()
    }

    /// Configured cadence in whole seconds.
    #[must_use]
    pub fn refresh_interval_secs(&self) -> u64 {
        self.publisher.refresh_interval_secs()
    }

    /// Stop scheduling further ticks.
    ///
    /// Idempotent. The in-flight tick, if any, still completes; no new
    /// documents are published afterwards.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for SnapshotCollector {
    fn drop(&mut self) {
        self.shutdown();
        // The task either saw the signal already or gets abandoned here
        self.encoder_task.abort();
    }
}
