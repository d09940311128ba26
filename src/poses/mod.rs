//! Pose module for robot-arm-ik.
//!
//! Provides named Cartesian targets and step sequences for lookup by name.

mod registry;

pub use registry::PoseRegistry;
