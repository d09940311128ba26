//! Builder pattern for RobotArm.

use embedded_hal::delay::DelayNs;

use crate::config::{ArmConfig, ChannelMap, LinkGeometry, MotionConfig};
use crate::error::{ConfigError, Error, Result};
use crate::gripper::EndEffector;
use crate::motion::TrajectoryInterpolator;
use crate::poses::PoseRegistry;
use crate::sink::ActuatorSink;

use super::driver::RobotArm;

/// Builder for creating RobotArm instances.
pub struct RobotArmBuilder<SINK, DELAY, GRIP>
where
    SINK: ActuatorSink,
    DELAY: DelayNs,
    GRIP: EndEffector,
{
    geometry: Option<LinkGeometry>,
    channels: Option<ChannelMap>,
    motion: MotionConfig,
    sink: Option<SINK>,
    delay: Option<DELAY>,
    gripper: Option<GRIP>,
    poses: PoseRegistry,
}

impl<SINK, DELAY, GRIP> Default for RobotArmBuilder<SINK, DELAY, GRIP>
where
    SINK: ActuatorSink,
    DELAY: DelayNs,
    GRIP: EndEffector,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<SINK, DELAY, GRIP> RobotArmBuilder<SINK, DELAY, GRIP>
where
    SINK: ActuatorSink,
    DELAY: DelayNs,
    GRIP: EndEffector,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            geometry: None,
            channels: None,
            motion: MotionConfig::default(),
            sink: None,
            delay: None,
            gripper: None,
            poses: PoseRegistry::new(),
        }
    }

    /// Set the link geometry.
    pub fn geometry(mut self, geometry: LinkGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set the channel calibration.
    pub fn channels(mut self, channels: ChannelMap) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Set interpolation timing.
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set the actuator sink.
    pub fn sink(mut self, sink: SINK) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the gripper.
    pub fn gripper(mut self, gripper: GRIP) -> Self {
        self.gripper = Some(gripper);
        self
    }

    /// Set the named poses and sequences.
    pub fn poses(mut self, poses: PoseRegistry) -> Self {
        self.poses = poses;
        self
    }

    /// Configure geometry, channels, motion and poses from an `ArmConfig`.
    ///
    /// The gripper is built separately from `config.gripper` since its
    /// hardware type is chosen by the caller.
    pub fn from_config(mut self, config: &ArmConfig) -> Self {
        self.geometry = Some(config.geometry);
        self.channels = Some(config.channels);
        self.motion = config.motion;
        self.poses = PoseRegistry::from_config(config);
        self
    }

    /// Build the RobotArm.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the geometry,
    /// channels or motion settings are invalid, or a registered pose or
    /// sequence is out of the arm's reach.
    pub fn build(self) -> Result<RobotArm<SINK, DELAY, GRIP>> {
        let geometry = self
            .geometry
            .ok_or(Error::Config(ConfigError::MissingField("geometry")))?;
        let channels = self
            .channels
            .ok_or(Error::Config(ConfigError::MissingField("channels")))?;
        let sink = self
            .sink
            .ok_or(Error::Config(ConfigError::MissingField("sink")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;
        let gripper = self
            .gripper
            .ok_or(Error::Config(ConfigError::MissingField("gripper")))?;

        geometry.validate()?;
        channels.validate()?;
        self.motion.validate()?;
        self.poses.validate(&geometry)?;

        Ok(RobotArm::new(
            geometry,
            channels,
            TrajectoryInterpolator::new(self.motion),
            sink,
            delay,
            gripper,
            self.poses,
        ))
    }
}
