//! Spin progress easing.
//!
//! A cubic ramp up to the handover point, then a long quintic tail that
//! bleeds speed off until the wheel stops. The share of progress given to
//! the tail is chosen so both progress and velocity are continuous at the
//! handover.

/// Normalized time at which the ramp hands over to the tail.
const SPLIT_T: f64 = 0.2;

const RAMP_POWER: f64 = 3.0;
const TAIL_POWER: f64 = 5.0;

/// Fraction of total progress that happens after the handover.
const TAIL_SHARE: f64 =
    (RAMP_POWER * (1.0 - SPLIT_T)) / (TAIL_POWER * SPLIT_T + RAMP_POWER * (1.0 - SPLIT_T));

const RAMP_SHARE: f64 = 1.0 - TAIL_SHARE;

/// Eased progress for normalized time `t`. Input is clamped into `[0, 1]`;
/// output covers `[0, 1]` monotonically with `ease(0) == 0` and
/// `ease(1) == 1`.
#[must_use]
pub fn ease(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);

    if t < SPLIT_T {
        RAMP_SHARE * (t / SPLIT_T).powf(RAMP_POWER)
    } else {
        1.0 - TAIL_SHARE * ((1.0 - t) / (1.0 - SPLIT_T)).powf(TAIL_POWER)
    }
}

///
/// TESTS
///
