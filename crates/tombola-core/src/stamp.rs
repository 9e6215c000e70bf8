//! Wall-clock seconds for winner records and snapshots.
//!
//! The engine never reads a clock itself. Callers pass a [`Timestamp`] into
//! every operation that records one, which keeps spins replayable.

use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

///
/// TimestampError
///

#[derive(Debug, ThisError)]
pub enum TimestampError {
    #[error("'{input}' is not an rfc3339 timestamp")]
    Parse { input: String },

    #[error("timestamps before the unix epoch are not representable")]
    PreEpoch,

    #[error("timestamp {secs} cannot be formatted")]
    Format { secs: u64 },
}

///
/// Timestamp
///
/// Seconds since the unix epoch.
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    FromStr,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Sub,
    SubAssign,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    /// Parse an RFC 3339 string such as `2024-03-01T18:30:00Z`.
    pub fn parse_rfc3339(input: &str) -> Result<Self, TimestampError> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| TimestampError::Parse {
            input: input.to_string(),
        })?;

        let secs =
            u64::try_from(parsed.unix_timestamp()).map_err(|_| TimestampError::PreEpoch)?;

        Ok(Self(secs))
    }

    /// Render as RFC 3339 in UTC.
    pub fn format_rfc3339(self) -> Result<String, TimestampError> {
        let secs = i64::try_from(self.0).map_err(|_| TimestampError::Format { secs: self.0 })?;
        let dt = OffsetDateTime::from_unix_timestamp(secs)
            .map_err(|_| TimestampError::Format { secs: self.0 })?;

        dt.format(&Rfc3339)
            .map_err(|_| TimestampError::Format { secs: self.0 })
    }

    /// This timestamp advanced by a millisecond interval, floored to whole
    /// seconds. Saturates instead of wrapping.
    #[must_use]
    pub const fn plus_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis / 1_000))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// TESTS
///
