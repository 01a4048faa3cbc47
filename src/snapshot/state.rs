//! Mutable per-producer and per-client sequence markers
//!
//! Writers are arbitrary relay tasks recording progress as data is produced
//! or acknowledged; the only reader is the encoder, once per tick. The maps
//! are sharded so writes to distinct keys do not contend, and the encoder
//! copies entries out without holding any lock across serialization.

use crate::config::ScnPolicy;
use crate::types::Scn;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Thread-safe record of the latest sequence marker seen per producer and
/// per client.
///
/// Cloning is cheap: all clones share the same underlying maps. A write and
/// a read of the same key may interleave, in which case the read observes
/// either the old or the new value.
#[derive(Debug, Clone)]
pub struct SnapshotState {
    inner: Arc<StateInner>,
}

#[derive(Debug)]
struct StateInner {
    producer_scn: DashMap<String, Scn>,
    client_scn: DashMap<String, Scn>,
    policy: ScnPolicy,
}

impl SnapshotState {
    /// Create empty maps governed by the given update policy.
    #[must_use]
    pub fn new(policy: ScnPolicy) -> Self {
        Self {
            inner: Arc::new(StateInner {
                producer_scn: DashMap::new(),
                client_scn: DashMap::new(),
                policy,
            }),
        }
    }

    /// Record the latest SCN generated by a producer.
    ///
    /// Entries are created on first write and live for the process lifetime.
    pub fn record_producer_scn(&self, producer: &str, scn: Scn) {
        Self::apply(&self.inner.producer_scn, self.inner.policy, producer, scn);
    }

    /// Record the latest SCN acknowledged or requested by a client.
    pub fn record_client_scn(&self, client: &str, scn: Scn) {
        Self::apply(&self.inner.client_scn, self.inner.policy, client, scn);
    }

    fn apply(map: &DashMap<String, Scn>, policy: ScnPolicy, key: &str, scn: Scn) {
        match policy {
            ScnPolicy::LastWriteWins => {
                map.insert(key.to_owned(), scn);
            }
            ScnPolicy::Monotonic => {
                let mut entry = map.entry(key.to_owned()).or_insert(scn);
                if scn > *entry {
                    *entry = scn;
                }
            }
        }
    }

    /// Copy out the full producer map, all producers ever seen.
    ///
    /// The copy is consistent per entry; entries updated concurrently may
    /// surface either value. Keys come out sorted so repeated snapshots of
    /// unchanged state are structurally identical.
    #[must_use]
    pub fn snapshot_producers(&self) -> BTreeMap<String, Scn> {
        self.inner
            .producer_scn
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Latest SCN reported by a client, or `None` if it never reported.
    ///
    /// Absence is data, not an error: downstream it becomes an explicit
    /// `null` for connected peers that have not reported yet.
    #[must_use]
    pub fn lookup_client_scn(&self, client: &str) -> Option<Scn> {
        self.inner.client_scn.get(client).map(|entry| *entry.value())
    }

    /// Number of producers ever seen.
    #[must_use]
    pub fn producer_count(&self) -> usize {
        self.inner.producer_scn.len()
    }

    /// Number of clients that have reported at least once.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.inner.client_scn.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        assert_eq!(state.producer_count(), 0);
        assert_eq!(state.client_count(), 0);
        assert!(state.snapshot_producers().is_empty());
        assert_eq!(state.lookup_client_scn("c1"), None);
    }

    #[test]
    fn test_record_producer_scn() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        state.record_producer_scn("p1", Scn::new(100));

        let producers = state.snapshot_producers();
        assert_eq!(producers.get("p1"), Some(&Scn::new(100)));
        assert_eq!(state.producer_count(), 1);
    }

    #[test]
    fn test_record_client_scn_and_lookup() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        state.record_client_scn("c1", Scn::new(5));

        assert_eq!(state.lookup_client_scn("c1"), Some(Scn::new(5)));
        assert_eq!(state.lookup_client_scn("c2"), None);
    }

    #[test]
    fn test_last_write_wins_accepts_regression() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        state.record_producer_scn("p1", Scn::new(100));
        state.record_producer_scn("p1", Scn::new(50));

        assert_eq!(
            state.snapshot_producers().get("p1"),
            Some(&Scn::new(50))
        );
    }

    #[test]
    fn test_monotonic_ignores_regression() {
        let state = SnapshotState::new(ScnPolicy::Monotonic);
        state.record_producer_scn("p1", Scn::new(100));
        state.record_producer_scn("p1", Scn::new(50));

        assert_eq!(
            state.snapshot_producers().get("p1"),
            Some(&Scn::new(100))
        );
    }

    #[test]
    fn test_monotonic_accepts_advancement() {
        let state = SnapshotState::new(ScnPolicy::Monotonic);
        state.record_client_scn("c1", Scn::new(10));
        state.record_client_scn("c1", Scn::new(20));

        assert_eq!(state.lookup_client_scn("c1"), Some(Scn::new(20)));
    }

    #[test]
    fn test_producer_and_client_maps_are_independent() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        state.record_producer_scn("same-id", Scn::new(1));
        state.record_client_scn("same-id", Scn::new(2));

        assert_eq!(
            state.snapshot_producers().get("same-id"),
            Some(&Scn::new(1))
        );
        assert_eq!(state.lookup_client_scn("same-id"), Some(Scn::new(2)));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        state.record_producer_scn("p1", Scn::new(1));

        let before = state.snapshot_producers();
        state.record_producer_scn("p1", Scn::new(2));

        // The earlier copy is unaffected by later writes
        assert_eq!(before.get("p1"), Some(&Scn::new(1)));
        assert_eq!(
            state.snapshot_producers().get("p1"),
            Some(&Scn::new(2))
        );
    }

    #[test]
    fn test_snapshot_keys_are_sorted() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        state.record_producer_scn("zeta", Scn::new(1));
        state.record_producer_scn("alpha", Scn::new(2));
        state.record_producer_scn("mid", Scn::new(3));

        let keys: Vec<_> = state.snapshot_producers().into_keys().collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_clones_share_state() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);
        let writer = state.clone();

        writer.record_client_scn("c1", Scn::new(7));
        assert_eq!(state.lookup_client_scn("c1"), Some(Scn::new(7)));
    }

    #[test]
    fn test_concurrent_writers_distinct_keys() {
        let state = SnapshotState::new(ScnPolicy::LastWriteWins);

        let handles: Vec<_> = (0..16i64)
            .map(|i| {
                let writer = state.clone();
                std::thread::spawn(move || {
                    writer.record_producer_scn(&format!("p{}", i), Scn::new(i));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let producers = state.snapshot_producers();
        assert_eq!(producers.len(), 16);
        for i in 0..16i64 {
            assert_eq!(producers.get(&format!("p{}", i)), Some(&Scn::new(i)));
        }
    }
}
