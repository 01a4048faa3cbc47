//! Periodic snapshot publisher for a replication relay
//!
//! Aggregates live relay counters and per-peer sequence markers into a
//! single point-in-time JSON document on a fixed cadence, published
//! atomically so monitoring agents polling the relay never observe a torn
//! or missing snapshot.
//!
//! The relay itself (connection management, statistics collectors, the HTTP
//! layer serving the document) stays outside this crate, reached through
//! the [`relay::RelayStats`] seam.
//!
//! ```no_run
//! use relay_snapshot::{RelayStats, Scn, SnapshotCollector, SnapshotConfig};
//! use std::sync::Arc;
//!
//! # fn wire(relay: Arc<dyn RelayStats>) -> anyhow::Result<()> {
//! let collector = SnapshotCollector::start(SnapshotConfig::default(), relay)?;
//! collector.record_producer_scn("orders-db", Scn::new(41_002));
//!
//! // handed to the transport layer
//! let publisher = collector.publisher();
//! let _json = publisher.current_document();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod relay;
pub mod snapshot;
pub mod types;

pub use config::{ConfigError, ScnPolicy, SnapshotConfig, load_config};
pub use error::{EncodeError, StatsSection};
pub use relay::RelayStats;
pub use snapshot::{
    EncodeOutcome, SnapshotCollector, SnapshotDocument, SnapshotEncoder, SnapshotPublisher,
    SnapshotState,
};
pub use types::Scn;
