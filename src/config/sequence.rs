//! Named pick-and-place sequences from TOML.

use heapless::{String, Vec};
use serde::Deserialize;

use super::gripper::GripAction;
use crate::kinematics::CartesianTarget;

/// Maximum number of steps in one sequence.
pub const MAX_SEQUENCE_STEPS: usize = 32;

/// One step of a sequence.
///
/// In TOML each step is an inline table with a single key:
/// `{ pose = "home" }`, `{ target = { x = 1.0, y = 0.0, z = 2.0 } }`,
/// `{ grip = "close" }` or `{ dwell_ms = 300 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceStep {
    /// Move to a named pose.
    Pose(String<32>),
    /// Move to an explicit point.
    Target(CartesianTarget),
    /// Open or close the gripper.
    Grip(GripAction),
    /// Wait (milliseconds).
    DwellMs(u32),
}

/// Ordered list of steps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SequenceConfig {
    /// Steps, executed in order (max 32).
    pub steps: Vec<SequenceStep, MAX_SEQUENCE_STEPS>,
}

impl SequenceConfig {
    /// Names of every pose the sequence refers to.
    pub fn pose_refs(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match step {
            SequenceStep::Pose(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Explicit targets in the sequence.
    pub fn targets(&self) -> impl Iterator<Item = &CartesianTarget> {
        self.steps.iter().filter_map(|step| match step {
            SequenceStep::Target(target) => Some(target),
            _ => None,
        })
    }
}
