//! Gripper configuration from TOML.

use serde::Deserialize;

use super::units::Degrees;

/// Gripper action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum GripAction {
    /// Release.
    Open,
    /// Grasp.
    Close,
}

/// Rotation direction of the gripper's DC motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum DriveDirection {
    /// IN1 low, IN2 high.
    Clockwise,
    /// IN1 high, IN2 low.
    CounterClockwise,
}

impl DriveDirection {
    /// Levels for the (IN1, IN2) bridge inputs, `true` = high.
    #[inline]
    pub fn input_levels(self) -> (bool, bool) {
        match self {
            DriveDirection::Clockwise => (false, true),
            DriveDirection::CounterClockwise => (true, false),
        }
    }

    /// The other direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            DriveDirection::Clockwise => DriveDirection::CounterClockwise,
            DriveDirection::CounterClockwise => DriveDirection::Clockwise,
        }
    }
}

/// One timed drive pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrivePulse {
    /// PWM magnitude, 0-255.
    pub speed: u8,
    /// Rotation direction.
    pub direction: DriveDirection,
}

impl DrivePulse {
    /// Default open pulse.
    pub const OPEN: Self = Self {
        speed: 132,
        direction: DriveDirection::CounterClockwise,
    };

    /// Default close pulse.
    pub const CLOSE: Self = Self {
        speed: 133,
        direction: DriveDirection::Clockwise,
    };

    /// Default drive time per action (milliseconds).
    pub const DEFAULT_DURATION_MS: u32 = 500;
}

/// Gripper hardware variant.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum GripperConfig {
    /// Hobby servo on the gripper channel, set to a fixed angle per action.
    Direct {
        /// Angle commanded by `open`.
        #[serde(default = "default_open_degrees")]
        open_degrees: Degrees,
        /// Angle commanded by `close`.
        #[serde(default = "default_close_degrees")]
        close_degrees: Degrees,
    },
    /// DC motor on an H-bridge, driven for a fixed time then braked.
    TimedDrive {
        /// Pulse issued by `open`.
        #[serde(default = "default_open_pulse")]
        open: DrivePulse,
        /// Pulse issued by `close`.
        #[serde(default = "default_close_pulse")]
        close: DrivePulse,
        /// Drive time per action (milliseconds).
        #[serde(default = "default_drive_ms")]
        duration_ms: u32,
    },
}

fn default_open_degrees() -> Degrees {
    Degrees(0.0)
}

fn default_close_degrees() -> Degrees {
    Degrees(90.0)
}

fn default_open_pulse() -> DrivePulse {
    DrivePulse::OPEN
}

fn default_close_pulse() -> DrivePulse {
    DrivePulse::CLOSE
}

fn default_drive_ms() -> u32 {
    DrivePulse::DEFAULT_DURATION_MS
}

impl GripperConfig {
    /// Direct servo gripper with the default 0° open / 90° close angles.
    pub fn direct() -> Self {
        GripperConfig::Direct {
            open_degrees: default_open_degrees(),
            close_degrees: default_close_degrees(),
        }
    }

    /// Timed DC drive with the default pulses and 500 ms duration.
    pub fn timed_drive() -> Self {
        GripperConfig::TimedDrive {
            open: default_open_pulse(),
            close: default_close_pulse(),
            duration_ms: default_drive_ms(),
        }
    }
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self::direct()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_levels() {
        assert_eq!(DriveDirection::Clockwise.input_levels(), (false, true));
        assert_eq!(DriveDirection::CounterClockwise.input_levels(), (true, false));
        assert_eq!(DriveDirection::Clockwise.reversed(), DriveDirection::CounterClockwise);
    }

    #[test]
    fn test_default_pulses_oppose() {
        match GripperConfig::timed_drive() {
            GripperConfig::TimedDrive { open, close, duration_ms } => {
                assert_eq!(open.direction, close.direction.reversed());
                assert_eq!(duration_ms, 500);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
