//! Configuration module for robot-arm-ik.
//!
//! Provides types for loading and validating arm geometry, channel calibration,
//! motion timing, gripper variant and named poses from TOML files (with `std`
//! feature) or pre-built values.

mod calibration;
mod geometry;
mod gripper;
#[cfg(feature = "std")]
mod loader;
mod motion;
mod sequence;
mod system;
pub mod units;
mod validation;

pub use calibration::{ChannelCalibration, ChannelMap};
pub use geometry::LinkGeometry;
pub use gripper::{DriveDirection, DrivePulse, GripAction, GripperConfig};
pub use motion::MotionConfig;
pub use sequence::{SequenceConfig, SequenceStep, MAX_SEQUENCE_STEPS};
pub use system::{ArmConfig, MAX_POSES, MAX_SEQUENCES};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::Degrees;
