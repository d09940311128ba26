//! Motion module for robot-arm-ik.
//!
//! Provides easing curves, per-move step execution and the interpolator that
//! owns the arm's current pose.

mod easing;
mod executor;
mod interpolator;

pub use easing::Easing;
pub use executor::MotionExecutor;
pub use interpolator::{MotionState, TrajectoryInterpolator};
