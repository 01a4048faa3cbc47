//! Shared newtypes and serde helpers
//!
//! Sequence markers are wrapped in a newtype so producer positions and
//! client acknowledgements cannot be confused with other integer counters
//! flowing through the relay.

use serde::{Deserialize, Serialize};

/// Sequence Change Number: a position in the replication stream.
///
/// Attributed to a producer (latest generated) or a client (latest
/// acknowledged). Serializes as a bare integer. The crate stores SCNs
/// verbatim and never interprets them beyond the configured update policy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Scn(i64);

impl Scn {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for Scn {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Scn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde helpers for `Duration` config fields expressed in whole seconds.
///
/// Use with `#[serde(with = "crate::types::duration_secs")]`.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
