//! Arm configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::calibration::ChannelMap;
use super::geometry::LinkGeometry;
use super::gripper::GripperConfig;
use super::motion::MotionConfig;
use super::sequence::SequenceConfig;
use crate::kinematics::CartesianTarget;

/// Maximum number of named poses.
pub const MAX_POSES: usize = 16;

/// Maximum number of named sequences.
pub const MAX_SEQUENCES: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ArmConfig {
    /// Link lengths.
    pub geometry: LinkGeometry,

    /// Actuator channels and their calibration.
    pub channels: ChannelMap,

    /// Interpolation timing.
    #[serde(default)]
    pub motion: MotionConfig,

    /// Gripper variant.
    #[serde(default)]
    pub gripper: GripperConfig,

    /// Named Cartesian poses.
    #[serde(default)]
    pub poses: FnvIndexMap<String<32>, CartesianTarget, MAX_POSES>,

    /// Named sequences.
    #[serde(default)]
    pub sequences: FnvIndexMap<String<32>, SequenceConfig, MAX_SEQUENCES>,
}

impl ArmConfig {
    /// Create a configuration with no poses or sequences.
    pub fn new(geometry: LinkGeometry, channels: ChannelMap) -> Self {
        Self {
            geometry,
            channels,
            motion: MotionConfig::default(),
            gripper: GripperConfig::default(),
            poses: FnvIndexMap::new(),
            sequences: FnvIndexMap::new(),
        }
    }

    /// Get a pose by name.
    pub fn pose(&self, name: &str) -> Option<&CartesianTarget> {
        self.poses
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a sequence by name.
    pub fn sequence(&self, name: &str) -> Option<&SequenceConfig> {
        self.sequences
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all pose names.
    pub fn pose_names(&self) -> impl Iterator<Item = &str> {
        self.poses.keys().map(|s| s.as_str())
    }

    /// List all sequence names.
    pub fn sequence_names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(|s| s.as_str())
    }
}
