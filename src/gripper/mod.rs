//! Gripper module for robot-arm-ik.
//!
//! The gripper is driven independently of the arm's kinematics. Two hardware
//! variants are supported: a servo set to fixed angles ([`DirectGripper`]) and
//! a DC motor on an H-bridge pulsed for a fixed time ([`TimedDriveGripper`]).

mod direct;
mod drive;

use embedded_hal::delay::DelayNs;

use crate::config::GripAction;
use crate::error::Result;
use crate::sink::ActuatorSink;

pub use direct::DirectGripper;
pub use drive::{DriveGuard, TimedDriveGripper};

/// End-effector actions.
///
/// `sink` and `delay` are lent by the arm controller so the gripper can share
/// the arm's servo driver and timer.
pub trait EndEffector {
    /// Acquire whatever the gripper needs before its first action.
    fn begin(&mut self) -> Result<()>;

    /// Perform one action to completion.
    fn actuate<S, D>(&mut self, action: GripAction, sink: &mut S, delay: &mut D) -> Result<()>
    where
        S: ActuatorSink,
        D: DelayNs;

    /// Open the gripper.
    fn open<S, D>(&mut self, sink: &mut S, delay: &mut D) -> Result<()>
    where
        S: ActuatorSink,
        D: DelayNs,
    {
        self.actuate(GripAction::Open, sink, delay)
    }

    /// Close the gripper.
    fn close<S, D>(&mut self, sink: &mut S, delay: &mut D) -> Result<()>
    where
        S: ActuatorSink,
        D: DelayNs,
    {
        self.actuate(GripAction::Close, sink, delay)
    }
}
