//! Per-spin outcome configuration and target resolution.
//!
//! Invariants:
//! - Directives are read once, at spin start; later edits wait for the
//!   next spin.
//! - Tickets are authoritative. A display name matches only when provably
//!   unique, and an unresolvable target degrades the spin to random, never
//!   to a guess.
//! - The external fallback gets exactly one retry.

use crate::{
    identity::{EntryName, SpinNumber, TicketId},
    roster::{IdentityResolution, Roster},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// RigMode
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RigMode {
    #[default]
    Random,
    Fixed,
}

///
/// RigTarget
///
/// The intended winner for one spin, captured at configuration time
/// against a possibly different roster.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RigTarget {
    pub ticket: Option<TicketId>,
    pub name: Option<EntryName>,
}

impl RigTarget {
    #[must_use]
    pub const fn new(ticket: Option<TicketId>, name: Option<EntryName>) -> Self {
        Self { ticket, name }
    }

    #[must_use]
    pub const fn by_ticket(ticket: TicketId) -> Self {
        Self {
            ticket: Some(ticket),
            name: None,
        }
    }

    #[must_use]
    pub const fn by_name(name: EntryName) -> Self {
        Self {
            ticket: None,
            name: Some(name),
        }
    }
}

///
/// RigDirective
///
/// What the store says about one spin: how to pick, and whom. An absent
/// mode means "unconfigured"; the wheel's session default fills it in.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RigDirective {
    pub mode: Option<RigMode>,
    pub target: Option<RigTarget>,
}

///
/// RigStore
///

pub trait RigStore {
    fn directive_for(&self, spin: SpinNumber) -> RigDirective;
}

///
/// MemoryRigStore
///

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryRigStore {
    modes: BTreeMap<SpinNumber, RigMode>,
    targets: BTreeMap<SpinNumber, RigTarget>,
}

impl MemoryRigStore {
    pub fn set_mode(&mut self, spin: SpinNumber, mode: RigMode) {
        self.modes.insert(spin, mode);
    }

    pub fn set_target(&mut self, spin: SpinNumber, target: RigTarget) {
        self.targets.insert(spin, target);
    }

    /// Forget everything configured for one spin.
    pub fn clear_spin(&mut self, spin: SpinNumber) {
        self.modes.remove(&spin);
        self.targets.remove(&spin);
    }

    /// Forget all per-spin configuration.
    pub fn clear(&mut self) {
        self.modes.clear();
        self.targets.clear();
    }
}

impl RigStore for MemoryRigStore {
    fn directive_for(&self, spin: SpinNumber) -> RigDirective {
        RigDirective {
            mode: self.modes.get(&spin).copied(),
            target: self.targets.get(&spin).cloned(),
        }
    }
}

///
/// RigFallback
///
/// Optional external source consulted when a target fails to resolve. May
/// supply a replacement descriptor to retry with, once.
///

pub trait RigFallback {
    fn lookup(&self, spin: SpinNumber, target: &RigTarget) -> Option<RigTarget>;
}

///
/// RigMissReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigMissReason {
    Ambiguous,
    NotFound,
    NoTarget,
}

///
/// RigOutcome
///
/// Whether a spin was steered, and where it was steered to. Misses are
/// recoverable: the spin still runs, on the random path.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigOutcome {
    NotRigged,
    Hit { index: usize },
    Miss { reason: RigMissReason },
}

impl RigOutcome {
    #[must_use]
    pub const fn target_index(&self) -> Option<usize> {
        match self {
            Self::Hit { index } => Some(*index),
            Self::NotRigged | Self::Miss { .. } => None,
        }
    }
}

fn attempt(roster: &Roster, target: &RigTarget) -> Result<usize, RigMissReason> {
    if target.ticket.is_none() && target.name.is_none() {
        return Err(RigMissReason::NoTarget);
    }

    match roster.resolve(target.ticket.as_ref(), target.name.as_ref()) {
        IdentityResolution::Resolved(index) => Ok(index),
        IdentityResolution::Ambiguous { .. } => Err(RigMissReason::Ambiguous),
        IdentityResolution::NotFound => Err(RigMissReason::NotFound),
    }
}

/// Resolve a configured target against the current roster, consulting the
/// fallback at most once. A retry that also misses reports the retry's
/// reason; a fallback with nothing to offer leaves the first reason intact.
pub fn reconcile(
    roster: &Roster,
    target: &RigTarget,
    fallback: Option<&dyn RigFallback>,
    spin: SpinNumber,
) -> Result<usize, RigMissReason> {
    match attempt(roster, target) {
        Ok(index) => Ok(index),
        Err(first) => {
            if let Some(fallback) = fallback
                && let Some(retry) = fallback.lookup(spin, target)
            {
                return attempt(roster, &retry);
            }

            Err(first)
        }
    }
}

///
/// TESTS
///
