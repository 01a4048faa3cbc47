//! Read-side facade over the published document
//!
//! No mutation logic lives here; the publisher is a thin accessor over the
//! slot the encoder writes into.

use std::time::Duration;
use tokio::sync::watch;

/// Read accessor for the last published snapshot.
///
/// Cheap to clone; every clone observes the same published slot. Reads are
/// wait-free with respect to the encoder: a publish in progress never
/// exposes a partially written document.
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    document_rx: watch::Receiver<String>,
    refresh_interval: Duration,
}

impl SnapshotPublisher {
    pub(crate) fn new(document_rx: watch::Receiver<String>, refresh_interval: Duration) -> Self {
        Self {
            document_rx,
            refresh_interval,
        }
    }

    /// Last published JSON document.
    ///
    /// Empty string until the first tick completes, and again if a tick
    /// degrades past even the fallback document. Never absent.
    #[must_use]
    pub fn current_document(&self) -> String {
        self.document_rx.borrow().clone()
    }

    /// Configured cadence of the encoder.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Cadence in whole seconds, for callers setting cache or poll headers.
    #[must_use]
    pub const fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval.as_secs()
    }
}
