//! # robot-arm-ik
//!
//! Closed-form inverse kinematics and eased servo motion for a 3-DOF arm
//! (shoulder yaw, upper arm pitch, lower arm pitch) with a gripper.
//!
//! ## Features
//!
//! - **Closed-form IK**: law-of-cosines solver with reachability checks
//! - **Smoothed motion**: cosine-eased interpolation from the current pose
//! - **Blocking or ticked**: run a move to completion or step it from your own loop
//! - **Two grippers**: direct servo or timed DC drive on an H-bridge
//! - **Configuration-driven**: geometry, calibration, poses and sequences in TOML
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use robot_arm_ik::{DirectGripper, RobotArm};
//!
//! // Load configuration from TOML
//! let config = robot_arm_ik::load_config("arm.toml")?;
//! let gripper = DirectGripper::from_config(&config.gripper, &config.channels.gripper)?;
//!
//! // Servo board as the actuator sink, embedded-hal delay for pacing
//! let mut arm = RobotArm::builder()
//!     .from_config(&config)
//!     .sink(servo_board)
//!     .delay(delay)
//!     .gripper(gripper)
//!     .build()?;
//!
//! arm.begin()?;
//! arm.move_to(14.0, 0.0, 5.0)?;
//! arm.grip_close()?;
//! arm.run_sequence("drop_off")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod arm;
pub mod config;
pub mod error;
pub mod gripper;
pub mod kinematics;
pub mod motion;
pub mod poses;
pub mod sink;

// Re-exports for ergonomic API
pub use arm::{MotionStatus, RobotArm, RobotArmBuilder};
pub use config::{
    validate_config, ArmConfig, ChannelCalibration, ChannelMap, GripAction, GripperConfig,
    LinkGeometry, MotionConfig,
};
pub use error::{Error, Result};
pub use gripper::{DirectGripper, EndEffector, TimedDriveGripper};
pub use kinematics::{forward, solve, CartesianTarget, JointPose};
pub use motion::{Easing, MotionState};
pub use poses::PoseRegistry;
pub use sink::ActuatorSink;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::Degrees;
