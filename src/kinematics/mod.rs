//! Kinematics module for robot-arm-ik.
//!
//! Closed-form inverse kinematics for the shoulder-yaw + two-link pitch arm,
//! its forward counterpart, and the pose types both work in.

mod forward;
mod pose;
mod solver;

pub use forward::{elbow_position, forward};
pub use pose::{CartesianTarget, JointPose};
pub use solver::{is_reachable, solve, solve_raw, RawSolution, REACH_TOLERANCE};
