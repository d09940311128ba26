//! Error types for robot-arm-ik.
//!
//! Provides unified error handling across configuration, kinematics, motion and gripper control.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all robot-arm-ik operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Target cannot be solved for the arm geometry
    Kinematics(KinematicsError),
    /// Motion sequencing error
    Motion(MotionError),
    /// Gripper drive error
    Gripper(GripperError),
    /// The actuator sink rejected a command
    Actuator {
        /// Channel that was being written
        channel: u8,
    },
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Link length must be finite and > 0
    InvalidLinkLength(f32),
    /// Interpolation step count must be >= 1
    InvalidStepCount(u16),
    /// Two actuators share the same channel
    DuplicateChannel(u8),
    /// Pose name not found in configuration
    PoseNotFound(heapless::String<32>),
    /// Sequence name not found in configuration
    SequenceNotFound(heapless::String<32>),
    /// Configured pose cannot be reached with the configured geometry
    UnreachablePose(heapless::String<32>),
    /// Sequence has no steps
    EmptySequence(heapless::String<32>),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// Configured gripper variant does not match the gripper being built
    GripperVariantMismatch,
    /// Pose or sequence name longer than 32 bytes
    NameTooLong,
    /// Registry has no room for another entry
    RegistryFull,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Inverse kinematics failures. None of these change the arm's state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KinematicsError {
    /// Target lies beyond full extension of both links
    Unreachable {
        /// Distance from shoulder origin to target
        distance: f32,
        /// L1 + L2
        max_reach: f32,
    },
    /// Target lies inside the inner disc the arm cannot fold into
    InsideDeadZone {
        /// Distance from shoulder origin to target
        distance: f32,
        /// |L1 - L2|
        min_reach: f32,
    },
    /// A target coordinate is NaN or infinite
    NonFiniteTarget,
}

/// Motion sequencing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// A ticked move is still in progress
    Busy,
    /// `tick` called with no move in progress
    NoActiveMove,
}

/// Gripper errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GripperError {
    /// Standby or direction pin write failed
    PinError,
    /// PWM duty update failed
    PwmError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Kinematics(e) => write!(f, "Kinematics error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Gripper(e) => write!(f, "Gripper error: {}", e),
            Error::Actuator { channel } => {
                write!(f, "Actuator sink rejected command on channel {}", channel)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidLinkLength(v) => {
                write!(f, "Invalid link length: {}. Must be finite and > 0", v)
            }
            ConfigError::InvalidStepCount(v) => write!(f, "Invalid step count: {}. Must be >= 1", v),
            ConfigError::DuplicateChannel(ch) => {
                write!(f, "Channel {} is assigned to more than one actuator", ch)
            }
            ConfigError::PoseNotFound(name) => write!(f, "Pose '{}' not found", name),
            ConfigError::SequenceNotFound(name) => write!(f, "Sequence '{}' not found", name),
            ConfigError::UnreachablePose(name) => {
                write!(f, "Pose '{}' is outside the arm's reach", name)
            }
            ConfigError::EmptySequence(name) => write!(f, "Sequence '{}' has no steps", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::GripperVariantMismatch => {
                write!(f, "Configured gripper variant does not match the requested gripper")
            }
            ConfigError::NameTooLong => write!(f, "Name exceeds 32 bytes"),
            ConfigError::RegistryFull => write!(f, "Registry is full"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for KinematicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinematicsError::Unreachable { distance, max_reach } => {
                write!(f, "Target at distance {} is beyond maximum reach {}", distance, max_reach)
            }
            KinematicsError::InsideDeadZone { distance, min_reach } => {
                write!(f, "Target at distance {} is inside minimum reach {}", distance, min_reach)
            }
            KinematicsError::NonFiniteTarget => write!(f, "Target coordinates must be finite"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::Busy => write!(f, "A move is already in progress"),
            MotionError::NoActiveMove => write!(f, "No move in progress"),
        }
    }
}

impl fmt::Display for GripperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GripperError::PinError => write!(f, "GPIO pin operation failed"),
            GripperError::PwmError => write!(f, "PWM duty update failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<KinematicsError> for Error {
    fn from(e: KinematicsError) -> Self {
        Error::Kinematics(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<GripperError> for Error {
    fn from(e: GripperError) -> Self {
        Error::Gripper(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for KinematicsError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for GripperError {}
