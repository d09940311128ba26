//! Servo gripper commanded straight to fixed angles.

use embedded_hal::delay::DelayNs;

use super::EndEffector;
use crate::config::{ChannelCalibration, Degrees, GripAction, GripperConfig};
use crate::error::{ConfigError, Error, Result};
use crate::sink::ActuatorSink;

/// Gripper servo set to a fixed command per action, with no interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectGripper {
    channel: u8,
    open_command: u16,
    close_command: u16,
}

impl DirectGripper {
    /// Create from raw command values.
    pub const fn new(channel: u8, open_command: u16, close_command: u16) -> Self {
        Self {
            channel,
            open_command,
            close_command,
        }
    }

    /// Create from open/close angles mapped through the gripper channel's calibration.
    pub fn from_angles(calibration: &ChannelCalibration, open: Degrees, close: Degrees) -> Self {
        Self::new(
            calibration.channel,
            calibration.to_command(open.clamp_to_joint()),
            calibration.to_command(close.clamp_to_joint()),
        )
    }

    /// Create from the gripper section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::GripperVariantMismatch` if the configuration
    /// describes a timed-drive gripper.
    pub fn from_config(config: &GripperConfig, calibration: &ChannelCalibration) -> Result<Self> {
        match *config {
            GripperConfig::Direct {
                open_degrees,
                close_degrees,
            } => Ok(Self::from_angles(calibration, open_degrees, close_degrees)),
            GripperConfig::TimedDrive { .. } => {
                Err(Error::Config(ConfigError::GripperVariantMismatch))
            }
        }
    }

    /// Gripper channel.
    #[inline]
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Command value issued for an action.
    #[inline]
    pub fn command_for(&self, action: GripAction) -> u16 {
        match action {
            GripAction::Open => self.open_command,
            GripAction::Close => self.close_command,
        }
    }
}

impl EndEffector for DirectGripper {
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn actuate<S, D>(&mut self, action: GripAction, sink: &mut S, _delay: &mut D) -> Result<()>
    where
        S: ActuatorSink,
        D: DelayNs,
    {
        let command = self.command_for(action);
        debug!("gripper channel {} -> {}", self.channel, command);
        sink.set_command(self.channel, command)
            .map_err(|_| Error::Actuator {
                channel: self.channel,
            })
    }
}
