//! Arm module for robot-arm-ik.
//!
//! Ties the solver, the interpolator, the actuator sink and the gripper
//! together behind the arm's public operations.

mod builder;
mod driver;

pub use builder::RobotArmBuilder;
pub use driver::{MotionStatus, RobotArm};
