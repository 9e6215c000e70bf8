//! Angular bookkeeping between rotation values and slices.
//!
//! The wheel draws slice 0 starting at the top (-90 degrees in screen
//! space) and proceeds clockwise. Rotation values accumulate without bound
//! across spins and only matter modulo a full turn.
//!
//! Invariants:
//! - [`normalize_degrees`] lands in `[0, 360)` for any finite input.
//! - [`shortest_adjustment`] lands in `(-180, 180]`.
//! - [`slice_at`] is total for any `count >= 1`: a marker that slips
//!   between arcs through floating-point dust still resolves, to the
//!   nearest slice center.

use crate::FULL_TURN_DEGREES;

pub const SLICE_ORIGIN_DEGREES: f64 = -90.0;

/// Fold any finite angle into `[0, 360)`.
#[must_use]
pub const fn normalize_degrees(angle: f64) -> f64 {
    ((angle % FULL_TURN_DEGREES) + FULL_TURN_DEGREES) % FULL_TURN_DEGREES
}

/// Angular width of one slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn slice_angle(count: usize) -> f64 {
    FULL_TURN_DEGREES / count as f64
}

/// Where slice `index` begins, in wheel-local degrees.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn slice_start(index: usize, count: usize) -> f64 {
    normalize_degrees(index as f64 * slice_angle(count) + SLICE_ORIGIN_DEGREES)
}

/// The center of slice `index`, in wheel-local degrees.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn slice_center(index: usize, count: usize) -> f64 {
    let angle = slice_angle(count);

    normalize_degrees(index as f64 * angle + SLICE_ORIGIN_DEGREES + angle / 2.0)
}

/// The signed turn from `from` to `to` along the shorter way around,
/// folded into `(-180, 180]`. An exact half-turn reads as +180, never -180.
#[must_use]
pub const fn shortest_adjustment(from: f64, to: f64) -> f64 {
    let mut d = normalize_degrees(to) - normalize_degrees(from);
    if d > 180.0 {
        d -= FULL_TURN_DEGREES;
    } else if d <= -180.0 {
        d += FULL_TURN_DEGREES;
    }

    d
}

/// The slice under the marker for a final rotation value. Scans the slice
/// arcs in order; when rounding dust at the seam leaves the marker inside
/// no arc, the nearest slice center decides.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn slice_at(rotation: f64, count: usize) -> usize {
    debug_assert!(count > 0, "a wheel needs at least one slice");

    let marker = normalize_degrees(rotation);
    let angle = slice_angle(count);

    for index in 0..count {
        let start = normalize_degrees(index as f64 * angle + SLICE_ORIGIN_DEGREES);
        let end = normalize_degrees((index + 1) as f64 * angle + SLICE_ORIGIN_DEGREES);

        let hit = if start < end {
            marker >= start && marker < end
        } else {
            // Arc wraps the seam; with one slice, start == end covers
            // the whole circle.
            marker >= start || marker < end
        };
        if hit {
            return index;
        }
    }

    closest_center(marker, count)
}

fn closest_center(marker: f64, count: usize) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for index in 0..count {
        let diff = (marker - slice_center(index, count)).abs() % FULL_TURN_DEGREES;
        let distance = diff.min(FULL_TURN_DEGREES - diff);

        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }

    best
}

///
/// TESTS
///
