//! Spin mechanics: slice geometry, the easing curve, plan construction,
//! and the wheel state machine that drives them.

pub mod easing;
pub mod geometry;
pub mod plan;
pub mod wheel;


pub use plan::SpinPlan;
pub use wheel::{FrameOutcome, SpinPhase, SpinRecord, Wheel, WheelError, Winner};
