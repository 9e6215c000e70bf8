//! Deciding where a spin ends before it starts.
//!
//! Both paths draw a multi-turn rotation. The random path adds a free
//! offset; the fixed path replaces the offset with the exact adjustment
//! that parks the marker on the target slice's center.

use crate::{
    FULL_TURN_DEGREES,
    identity::SpinNumber,
    rig::{RigMode, RigOutcome},
    spin::geometry::{shortest_adjustment, slice_at, slice_center},
    tuning::SpinTuning,
};
use rand_chacha::rand_core::RngCore;
use serde::{Deserialize, Serialize};

///
/// SpinPlan
///
/// The angular bounds for one spin, fixed at spin start and immutable
/// afterwards.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub spin: SpinNumber,
    pub mode: RigMode,
    pub rig: RigOutcome,
    pub rotation_start: f64,
    pub rotation_end: f64,
    pub duration_ms: u64,
    pub entry_count: usize,
}

impl SpinPlan {
    /// The slice this plan settles on: the resolved target when the spin
    /// was steered, otherwise whatever sits under the marker at the final
    /// rotation.
    #[must_use]
    pub fn winning_index(&self) -> usize {
        self.rig
            .target_index()
            .unwrap_or_else(|| slice_at(self.rotation_end, self.entry_count))
    }
}

/// A free spin: several full turns plus an unconstrained offset.
pub fn plan_random(
    spin: SpinNumber,
    mode: RigMode,
    rig: RigOutcome,
    rotation_start: f64,
    entry_count: usize,
    tuning: &SpinTuning,
    rng: &mut impl RngCore,
) -> SpinPlan {
    let turns = draw_turns(tuning, rng);
    let offset = unit_f64(rng) * FULL_TURN_DEGREES;

    SpinPlan {
        spin,
        mode,
        rig,
        rotation_start,
        rotation_end: rotation_start + turns * FULL_TURN_DEGREES + offset,
        duration_ms: tuning.duration_ms(),
        entry_count,
    }
}

/// A steered spin: the same multi-turn draw, then the shortest angular
/// correction that ends the turn on the target slice's center.
pub fn plan_fixed(
    spin: SpinNumber,
    target_index: usize,
    rotation_start: f64,
    entry_count: usize,
    tuning: &SpinTuning,
    rng: &mut impl RngCore,
) -> SpinPlan {
    debug_assert!(target_index < entry_count);

    let base_end = rotation_start + draw_turns(tuning, rng) * FULL_TURN_DEGREES;
    let center = slice_center(target_index, entry_count);
    let adjustment = shortest_adjustment(base_end, center);

    SpinPlan {
        spin,
        mode: RigMode::Fixed,
        rig: RigOutcome::Hit {
            index: target_index,
        },
        rotation_start,
        rotation_end: base_end + adjustment,
        duration_ms: tuning.duration_ms(),
        entry_count,
    }
}

fn draw_turns(tuning: &SpinTuning, rng: &mut impl RngCore) -> f64 {
    tuning.min_turns() + unit_f64(rng) * (tuning.max_turns() - tuning.min_turns())
}

/// Uniform draw from `[0, 1)` using the 53 bits a double can hold.
#[allow(clippy::cast_precision_loss)]
fn unit_f64(rng: &mut impl RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

///
/// TESTS
///
