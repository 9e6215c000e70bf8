//! Core engine for Tombola: ticketed rosters, identity maps, rig
//! directives, spin planning, and the wheel state machine, with the
//! ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

pub mod identity;
pub mod obs;
pub mod rig;
pub mod roster;
pub mod snapshot;
pub mod spin;
pub mod stamp;
pub mod tuning;

///
/// CONSTANTS
///

/// Degrees in one full revolution of the wheel.
///
/// Every rotation scalar in the engine is in degrees; only
/// [`spin::geometry::normalize_degrees`] folds them into a single turn.
pub const FULL_TURN_DEGREES: f64 = 360.0;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, planners, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        identity::{EntryName, SpinNumber, TicketId, WheelId},
        rig::{RigMode, RigTarget},
        roster::{Entry, EntryDraft, Roster},
        spin::{SpinPhase, Wheel, Winner},
        stamp::Timestamp,
    };
}
