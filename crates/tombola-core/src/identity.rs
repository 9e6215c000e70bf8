//! Identity invariants and construction.
//!
//! Invariants:
//! - Names and tickets are trimmed once, at construction; no call site trims.
//! - Display names keep their as-entered casing; map keys are case-folded.
//! - Tickets compare exactly (trimmed, case-sensitive).
//! - Spin numbers are 1-based integers; no string keys anywhere.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error as ThisError;

///
/// EntryNameError
///

#[derive(Debug, ThisError)]
pub enum EntryNameError {
    #[error("entry name is empty")]
    Empty,
}

///
/// TicketIdError
///

#[derive(Debug, ThisError)]
pub enum TicketIdError {
    #[error("ticket number is empty")]
    Empty,
}

///
/// WheelIdError
///

#[derive(Debug, ThisError)]
pub enum WheelIdError {
    #[error("wheel identifier is empty")]
    Empty,
}

///
/// SpinNumberError
///

#[derive(Debug, ThisError)]
pub enum SpinNumberError {
    #[error("spin numbers start at 1")]
    Zero,
}

///
/// EntryName
///
/// A participant's display name as shown on the wheel. Not unique; two
/// participants may share one. [`Self::fold`] yields the canonical map key.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryName(String);

impl EntryName {
    pub fn try_new(name: impl AsRef<str>) -> Result<Self, EntryNameError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EntryNameError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical case-folded key for name-keyed maps.
    #[must_use]
    pub fn fold(&self) -> NameKey {
        NameKey(self.0.to_lowercase())
    }
}

impl TryFrom<String> for EntryName {
    type Error = EntryNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<EntryName> for String {
    fn from(name: EntryName) -> Self {
        name.0
    }
}

///
/// NameKey
///
/// The case-folded form of an [`EntryName`]. Only [`EntryName::fold`]
/// constructs one, so every name-keyed map goes through the same
/// normalization.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameKey(String);

impl NameKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key with one trailing `"(digits)"` suffix removed, for the
    /// removal-safety duplicate count. Imported rosters render tickets into
    /// the visible name (`"Sam (12)"`), so two such strings are one base
    /// identity when deciding whether name-keyed removal is safe. The suffix
    /// only strips when at least one character precedes it.
    #[must_use]
    pub fn base(&self) -> Self {
        let s = self.0.trim_end();
        if s.ends_with(')')
            && let Some(open) = s.rfind('(')
            && open > 0
            && let Some(inner) = s.get(open + 1..s.len() - 1)
            && !inner.is_empty()
            && inner.bytes().all(|b| b.is_ascii_digit())
        {
            return Self(s[..open].trim_end().to_string());
        }

        Self(s.to_string())
    }
}

impl fmt::Display for NameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

///
/// TicketId
///
/// An externally supplied unique identifier for one entry. Authoritative for
/// removal and rig resolution whenever present; compared exactly after a
/// single trim.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    pub fn try_new(ticket: impl AsRef<str>) -> Result<Self, TicketIdError> {
        let trimmed = ticket.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TicketIdError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TicketId {
    type Error = TicketIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<TicketId> for String {
    fn from(ticket: TicketId) -> Self {
        ticket.0
    }
}

///
/// WheelId
///
/// Key under which one wheel's snapshot is stored.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WheelId(String);

impl WheelId {
    pub fn try_new(id: impl AsRef<str>) -> Result<Self, WheelIdError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WheelIdError::Empty);
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WheelId {
    type Error = WheelIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<WheelId> for String {
    fn from(id: WheelId) -> Self {
        id.0
    }
}

///
/// SpinNumber
///
/// 1-based position of a spin in the session. Rig directives are keyed by
/// this, never by a stringified counter.
///

#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct SpinNumber(u32);

impl SpinNumber {
    pub const FIRST: Self = Self(1);

    pub const fn try_new(n: u32) -> Result<Self, SpinNumberError> {
        if n == 0 {
            return Err(SpinNumberError::Zero);
        }

        Ok(Self(n))
    }

    /// The spin after this one. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for SpinNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u32> for SpinNumber {
    type Error = SpinNumberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SpinNumber> for u32 {
    fn from(spin: SpinNumber) -> Self {
        spin.0
    }
}

///
/// TESTS
///
