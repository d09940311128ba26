//! Per-channel actuator calibration and the angle-to-command mapping.

use serde::Deserialize;

use super::units::Degrees;
use crate::error::{ConfigError, Error, Result};

/// Command range of one actuator channel over the logical 0-180° sweep.
///
/// `min_command` is the command at 0°, `max_command` the command at 180°.
/// Reverse-wired servos simply have `min_command > max_command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelCalibration {
    /// Actuator channel id on the sink.
    pub channel: u8,

    /// Command value at 0°.
    pub min_command: u16,

    /// Command value at 180°.
    pub max_command: u16,
}

impl ChannelCalibration {
    /// Create a calibration entry.
    pub const fn new(channel: u8, min_command: u16, max_command: u16) -> Self {
        Self {
            channel,
            min_command,
            max_command,
        }
    }

    /// Map a joint angle to a command value.
    ///
    /// The mapping is affine and does not clamp: angles outside 0-180° give
    /// commands outside the calibrated range (saturating only at the `u16`
    /// bounds). Callers clamp angles first.
    pub fn to_command(&self, angle: Degrees) -> u16 {
        let min = self.min_command as f32;
        let max = self.max_command as f32;
        let command = min + (angle.0 / 180.0) * (max - min);
        libm::roundf(command) as u16
    }

    /// Check if the channel is wired in reverse (command falls as angle rises).
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.max_command < self.min_command
    }
}

/// Calibration for every channel the arm drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMap {
    /// Shoulder yaw servo.
    pub shoulder: ChannelCalibration,
    /// Upper arm pitch servo.
    pub upper: ChannelCalibration,
    /// Lower arm pitch servo.
    pub lower: ChannelCalibration,
    /// Gripper servo (direct gripper only, the channel is still reserved otherwise).
    pub gripper: ChannelCalibration,
}

impl ChannelMap {
    /// All four calibrations, in emit order followed by the gripper.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelCalibration> {
        [&self.shoulder, &self.upper, &self.lower, &self.gripper].into_iter()
    }

    /// Check no two actuators share a channel id.
    pub fn validate(&self) -> Result<()> {
        let channels = [
            self.shoulder.channel,
            self.upper.channel,
            self.lower.channel,
            self.gripper.channel,
        ];
        for (i, channel) in channels.iter().enumerate() {
            if channels[i + 1..].contains(channel) {
                return Err(Error::Config(ConfigError::DuplicateChannel(*channel)));
            }
        }
        Ok(())
    }
}
