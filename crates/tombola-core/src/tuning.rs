//! Spin pacing knobs.
//!
//! Invariants:
//! - A [`SpinTuning`] can only hold values that produce a finishable spin;
//!   validation runs at construction and at deserialization.
//! - Stock values match the classic wheel feel: six seconds, five to eight
//!   full turns, a slow idle drift.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

pub const DEFAULT_SPIN_DURATION_MS: u64 = 6_000;
pub const DEFAULT_MIN_TURNS: f64 = 5.0;
pub const DEFAULT_MAX_TURNS: f64 = 8.0;
pub const DEFAULT_IDLE_DRIFT_DEG_PER_SEC: f64 = 30.0;

///
/// TuningError
///

#[derive(Debug, ThisError)]
pub enum TuningError {
    #[error("spin duration must be positive")]
    ZeroDuration,

    #[error("turn range {min}..{max} is unusable")]
    BadTurnRange { min: f64, max: f64 },

    #[error("idle drift {speed} must be finite and non-negative")]
    BadDrift { speed: f64 },
}

///
/// SpinTuning
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpinTuning")]
pub struct SpinTuning {
    duration_ms: u64,
    min_turns: f64,
    max_turns: f64,
    idle_drift_deg_per_sec: f64,
}

impl SpinTuning {
    pub const fn try_new(
        duration_ms: u64,
        min_turns: f64,
        max_turns: f64,
        idle_drift_deg_per_sec: f64,
    ) -> Result<Self, TuningError> {
        if duration_ms == 0 {
            return Err(TuningError::ZeroDuration);
        }
        if !min_turns.is_finite()
            || !max_turns.is_finite()
            || min_turns <= 0.0
            || max_turns < min_turns
        {
            return Err(TuningError::BadTurnRange {
                min: min_turns,
                max: max_turns,
            });
        }
        if !idle_drift_deg_per_sec.is_finite() || idle_drift_deg_per_sec < 0.0 {
            return Err(TuningError::BadDrift {
                speed: idle_drift_deg_per_sec,
            });
        }

        Ok(Self {
            duration_ms,
            min_turns,
            max_turns,
            idle_drift_deg_per_sec,
        })
    }

    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub const fn min_turns(&self) -> f64 {
        self.min_turns
    }

    #[must_use]
    pub const fn max_turns(&self) -> f64 {
        self.max_turns
    }

    #[must_use]
    pub const fn idle_drift_deg_per_sec(&self) -> f64 {
        self.idle_drift_deg_per_sec
    }
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_SPIN_DURATION_MS,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
            idle_drift_deg_per_sec: DEFAULT_IDLE_DRIFT_DEG_PER_SEC,
        }
    }
}

impl TryFrom<RawSpinTuning> for SpinTuning {
    type Error = TuningError;

    fn try_from(raw: RawSpinTuning) -> Result<Self, Self::Error> {
        Self::try_new(
            raw.duration_ms,
            raw.min_turns,
            raw.max_turns,
            raw.idle_drift_deg_per_sec,
        )
    }
}

///
/// RawSpinTuning
///
/// Unvalidated wire shape, only reachable through deserialization.
///

#[derive(Debug, Deserialize)]
struct RawSpinTuning {
    duration_ms: u64,
    min_turns: f64,
    max_turns: f64,
    idle_drift_deg_per_sec: f64,
}

///
/// TESTS
///
