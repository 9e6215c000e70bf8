//! The session-boundary error type.
//!
//! Engine modules keep their own structured errors; this module flattens
//! them into one classified shape for callers that drive a whole session
//! and only branch on what went wrong, not where.

use derive_more::Display;
use thiserror::Error as ThisError;
use tombola_core::{
    identity::{EntryNameError, SpinNumberError, TicketIdError, WheelIdError},
    roster::RosterError,
    snapshot::StoreError,
    spin::WheelError,
    tuning::TuningError,
};

///
/// Error
///
/// Structured session error with a stable classification. The class says
/// what kind of failure happened, the origin which part of the engine
/// refused, and the message keeps the source wording.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self.class, ErrorClass::Conflict)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    /// More than one entry answers to the requested identity.
    #[display("ambiguous")]
    Ambiguous,

    /// The request is valid but the wheel is in the wrong state for it.
    #[display("conflict")]
    Conflict,

    #[display("corruption")]
    Corruption,

    #[display("invalid")]
    Invalid,

    #[display("not_found")]
    NotFound,

    #[display("unavailable")]
    Unavailable,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorOrigin {
    #[display("identity")]
    Identity,

    #[display("roster")]
    Roster,

    #[display("session")]
    Session,

    #[display("spin")]
    Spin,

    #[display("store")]
    Store,
}

impl From<WheelError> for Error {
    fn from(err: WheelError) -> Self {
        match err {
            WheelError::AlreadySpinning => {
                Self::new(ErrorClass::Conflict, ErrorOrigin::Spin, err.to_string())
            }
            WheelError::EmptyRoster => {
                Self::new(ErrorClass::Invalid, ErrorOrigin::Spin, err.to_string())
            }
            WheelError::RosterLocked => {
                Self::new(ErrorClass::Conflict, ErrorOrigin::Roster, err.to_string())
            }
            WheelError::NoPendingWinner => {
                Self::new(ErrorClass::Conflict, ErrorOrigin::Spin, err.to_string())
            }
            WheelError::Roster(inner) => inner.into(),
            WheelError::Store(inner) => inner.into(),
        }
    }
}

impl From<RosterError> for Error {
    fn from(err: RosterError) -> Self {
        let class = match err {
            RosterError::TicketNotFound { .. } | RosterError::NameNotFound { .. } => {
                ErrorClass::NotFound
            }
            RosterError::AmbiguousName { .. } => ErrorClass::Ambiguous,
        };

        Self::new(class, ErrorOrigin::Roster, err.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        let class = match err {
            StoreError::NotFound { .. } => ErrorClass::NotFound,
            StoreError::Corrupt { .. } => ErrorClass::Corruption,
            StoreError::Unavailable { .. } => ErrorClass::Unavailable,
        };

        Self::new(class, ErrorOrigin::Store, err.to_string())
    }
}

impl From<EntryNameError> for Error {
    fn from(err: EntryNameError) -> Self {
        Self::new(ErrorClass::Invalid, ErrorOrigin::Identity, err.to_string())
    }
}

impl From<TicketIdError> for Error {
    fn from(err: TicketIdError) -> Self {
        Self::new(ErrorClass::Invalid, ErrorOrigin::Identity, err.to_string())
    }
}

impl From<WheelIdError> for Error {
    fn from(err: WheelIdError) -> Self {
        Self::new(ErrorClass::Invalid, ErrorOrigin::Identity, err.to_string())
    }
}

impl From<SpinNumberError> for Error {
    fn from(err: SpinNumberError) -> Self {
        Self::new(ErrorClass::Invalid, ErrorOrigin::Identity, err.to_string())
    }
}

impl From<TuningError> for Error {
    fn from(err: TuningError) -> Self {
        Self::new(ErrorClass::Invalid, ErrorOrigin::Session, err.to_string())
    }
}

///
/// TESTS
///
