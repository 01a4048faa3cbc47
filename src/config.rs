//! Snapshot collector configuration
//!
//! Deserializable with serde so embedders can splice a `[snapshot]` table
//! into their own config files; `load_config` covers standalone TOML files.

use crate::types::duration_secs;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default encoder cadence
fn default_refresh_interval() -> Duration {
    Duration::from_secs(1)
}

/// Policy applied when a new SCN is recorded for an already-known key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScnPolicy {
    /// Store every update verbatim, including out-of-order or regressed
    /// values. Mirrors the relay's historical behavior.
    #[default]
    LastWriteWins,
    /// Keep the maximum value seen; regressed updates are ignored.
    Monotonic,
}

impl ScnPolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LastWriteWins => "last-write-wins",
            Self::Monotonic => "monotonic",
        }
    }
}

impl std::fmt::Display for ScnPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the snapshot collector.
///
/// The refresh interval is fixed for the collector's lifetime; there is no
/// reconfiguration after startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Cadence of the encoder tick, in seconds (default: 1)
    #[serde(with = "duration_secs")]
    pub refresh_interval: Duration,
    /// SCN update policy (default: last-write-wins)
    pub scn_policy: ScnPolicy,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            scn_policy: ScnPolicy::default(),
        }
    }
}

/// Validation errors for [`SnapshotConfig`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("refresh interval cannot be zero")]
    ZeroRefreshInterval,
}

impl SnapshotConfig {
    /// Check that the configuration can actually drive a scheduler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }
}

/// Load and validate a configuration from a TOML file.
pub fn load_config(config_path: &str) -> Result<SnapshotConfig> {
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    let config: SnapshotConfig = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", config_path, e))?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SnapshotConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
        assert_eq!(config.scn_policy, ScnPolicy::LastWriteWins);
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(SnapshotConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = SnapshotConfig {
            refresh_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroRefreshInterval)
        );
    }

    #[test]
    fn test_scn_policy_display() {
        assert_eq!(ScnPolicy::LastWriteWins.to_string(), "last-write-wins");
        assert_eq!(ScnPolicy::Monotonic.to_string(), "monotonic");
    }

    #[test]
    fn test_deserialize_empty_table_uses_defaults() {
        let config: SnapshotConfig = toml::from_str("").unwrap();
        assert_eq!(config, SnapshotConfig::default());
    }

    #[test]
    fn test_deserialize_full_table() {
        let config: SnapshotConfig = toml::from_str(
            "refresh_interval = 5\nscn_policy = \"monotonic\"\n",
        )
        .unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.scn_policy, ScnPolicy::Monotonic);
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = SnapshotConfig {
            refresh_interval: Duration::from_secs(30),
            scn_policy: ScnPolicy::Monotonic,
        };
        let toml_string = toml::to_string(&config).unwrap();
        let parsed: SnapshotConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_config_from_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "refresh_interval = 2")?;

        let config = load_config(temp_file.path().to_str().unwrap())?;
        assert_eq!(config.refresh_interval, Duration::from_secs(2));
        assert_eq!(config.scn_policy, ScnPolicy::LastWriteWins);
        Ok(())
    }

    #[test]
    fn test_load_config_nonexistent_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_load_config_invalid_toml() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "refresh_interval = [[[")?;

        let result = load_config(temp_file.path().to_str().unwrap());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse config file")
        );
        Ok(())
    }

    #[test]
    fn test_load_config_rejects_zero_interval() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "refresh_interval = 0")?;

        let result = load_config(temp_file.path().to_str().unwrap());
        assert!(result.is_err());
        Ok(())
    }
}
