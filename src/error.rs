//! Error types for snapshot encoding
//!
//! Every error here is contained within a single encoder tick: it degrades
//! that tick's output to the fallback document and is never surfaced to
//! callers of the publisher facade, nor does it ever stop the schedule.

use thiserror::Error;

/// Which statistics totals section failed to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSection {
    /// Transport-level request handling totals
    Http,
    /// Inbound event totals
    Inbound,
    /// Outbound event totals
    Outbound,
}

impl StatsSection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }
}

impl std::fmt::Display for StatsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while encoding one snapshot tick.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A statistics totals sample could not be taken or converted
    #[error("failed to sample {section} statistics: {message}")]
    Stats {
        section: StatsSection,
        message: String,
    },

    /// The assembled document could not be serialized to JSON
    #[error("failed to serialize snapshot document: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EncodeError {
    /// Build a stats-sampling failure for the given section.
    pub fn stats(section: StatsSection, message: impl Into<String>) -> Self {
        Self::Stats {
            section,
            message: message.into(),
        }
    }

    /// Stable class name reported in the fallback document.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stats { .. } => "StatsFailure",
            Self::Serialize(_) => "SerializationFailure",
        }
    }

    /// Error detail carried into the fallback document's `message` field.
    ///
    /// For a stats failure this is the collaborator's message verbatim, not
    /// the full display chain.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Stats { message, .. } => message.clone(),
            Self::Serialize(err) => err.to_string(),
        }
    }
}
