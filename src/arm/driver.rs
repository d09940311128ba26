//! Robot arm controller.
//!
//! Generic over the actuator sink, the delay provider and the gripper.

use embedded_hal::delay::DelayNs;

use crate::config::{ChannelMap, GripAction, LinkGeometry, SequenceConfig, SequenceStep};
use crate::error::{ConfigError, Error, MotionError, Result};
use crate::gripper::EndEffector;
use crate::kinematics::{self, CartesianTarget, JointPose};
use crate::motion::{MotionState, TrajectoryInterpolator};
use crate::poses::PoseRegistry;
use crate::sink::ActuatorSink;

use super::builder::RobotArmBuilder;

/// Result of one [`RobotArm::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionStatus {
    /// More steps remain.
    Moving {
        /// Steps emitted so far.
        step: u16,
        /// Steps in the move.
        total: u16,
    },
    /// The final step was emitted and the arm is idle at the target.
    Complete,
}

/// 3-DOF arm with gripper.
///
/// Generic over:
/// - `SINK`: servo command output (must implement `ActuatorSink`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
/// - `GRIP`: end effector (must implement `EndEffector`)
pub struct RobotArm<SINK, DELAY, GRIP>
where
    SINK: ActuatorSink,
    DELAY: DelayNs,
    GRIP: EndEffector,
{
    /// Link lengths.
    geometry: LinkGeometry,

    /// Channel calibration for every actuator.
    channels: ChannelMap,

    /// Owns the current pose and the move in flight.
    interpolator: TrajectoryInterpolator,

    /// Servo command output.
    sink: SINK,

    /// Delay provider for step timing and dwells.
    delay: DELAY,

    /// End effector.
    gripper: GRIP,

    /// Named targets and sequences.
    poses: PoseRegistry,
}

impl<SINK, DELAY, GRIP> RobotArm<SINK, DELAY, GRIP>
where
    SINK: ActuatorSink,
    DELAY: DelayNs,
    GRIP: EndEffector,
{
    /// Create an arm builder.
    pub fn builder() -> RobotArmBuilder<SINK, DELAY, GRIP> {
        RobotArmBuilder::new()
    }

    pub(crate) fn new(
        geometry: LinkGeometry,
        channels: ChannelMap,
        interpolator: TrajectoryInterpolator,
        sink: SINK,
        delay: DELAY,
        gripper: GRIP,
        poses: PoseRegistry,
    ) -> Self {
        Self {
            geometry,
            channels,
            interpolator,
            sink,
            delay,
            gripper,
            poses,
        }
    }

    /// Prepare the gripper hardware.
    ///
    /// Arm servos are not touched: the first move snaps straight to its target.
    pub fn begin(&mut self) -> Result<()> {
        self.gripper.begin()?;
        info!("robot arm ready, reach {}", self.geometry.max_reach());
        Ok(())
    }

    /// Get the link geometry.
    #[inline]
    pub fn geometry(&self) -> &LinkGeometry {
        &self.geometry
    }

    /// Get the channel calibration.
    #[inline]
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Get the motion state.
    #[inline]
    pub fn state(&self) -> &MotionState {
        self.interpolator.state()
    }

    /// Check if a ticked move is in progress.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.interpolator.is_moving()
    }

    /// Last commanded joint pose, `None` before the first move.
    #[inline]
    pub fn current_pose(&self) -> Option<JointPose> {
        self.interpolator.current_pose()
    }

    /// Where the current pose puts the gripper.
    pub fn tool_position(&self) -> Option<CartesianTarget> {
        self.current_pose()
            .map(|pose| kinematics::forward(&pose, &self.geometry))
    }

    /// Get the pose registry.
    #[inline]
    pub fn poses(&self) -> &PoseRegistry {
        &self.poses
    }

    /// Register a named pose, replacing any pose with the same name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnreachablePose` if the arm cannot reach the
    /// target, or the registry's error.
    pub fn register_pose(&mut self, name: &str, target: CartesianTarget) -> Result<()> {
        if !kinematics::is_reachable(&target, &self.geometry) {
            warn!("pose {} rejected: out of reach", name);
            return Err(Error::Config(ConfigError::UnreachablePose(
                heapless::String::try_from(name).unwrap_or_default(),
            )));
        }
        self.poses.register_pose(name, target)
    }

    /// Register a sequence once it checks out against the registered poses.
    ///
    /// # Errors
    ///
    /// See [`PoseRegistry::check_sequence`], or the registry's error.
    pub fn register_sequence(&mut self, name: &str, sequence: SequenceConfig) -> Result<()> {
        self.poses.check_sequence(name, &sequence, &self.geometry)?;
        self.poses.register_sequence(name, sequence)
    }

    /// Get the gripper.
    #[inline]
    pub fn gripper(&self) -> &GRIP {
        &self.gripper
    }

    /// Get the actuator sink.
    #[inline]
    pub fn sink(&self) -> &SINK {
        &self.sink
    }

    /// Get the actuator sink mutably.
    #[inline]
    pub fn sink_mut(&mut self) -> &mut SINK {
        &mut self.sink
    }

    /// Release the sink, delay and gripper.
    pub fn release(self) -> (SINK, DELAY, GRIP) {
        (self.sink, self.delay, self.gripper)
    }

    /// Solve a target against this arm's geometry without moving.
    ///
    /// # Errors
    ///
    /// Returns `Error::Kinematics` if the target cannot be reached.
    pub fn solve(&self, target: &CartesianTarget) -> Result<JointPose> {
        kinematics::solve(target, &self.geometry).map_err(|e| {
            warn!("target ({}, {}, {}) rejected: {}", target.x, target.y, target.z, e);
            Error::Kinematics(e)
        })
    }

    /// Move to a Cartesian point and run to completion (blocking).
    ///
    /// Returns the solved joint pose, which is also the new current pose.
    ///
    /// # Errors
    ///
    /// - `Error::Kinematics` if the point cannot be reached (nothing is emitted)
    /// - `Error::Motion(Busy)` if a ticked move is in progress
    /// - `Error::Actuator` if the sink rejects a command mid-move
    pub fn move_to(&mut self, x: f32, y: f32, z: f32) -> Result<JointPose> {
        self.move_to_target(&CartesianTarget::new(x, y, z))
    }

    /// Move to a Cartesian target and run to completion (blocking).
    ///
    /// # Errors
    ///
    /// See [`move_to`](Self::move_to).
    pub fn move_to_target(&mut self, target: &CartesianTarget) -> Result<JointPose> {
        let (pose, _) = self.begin_move(target)?;
        let step_delay_ms = self.interpolator.config().step_delay_ms;

        while self.interpolator.is_moving() {
            self.tick()?;
            self.delay.delay_ms(step_delay_ms);
        }

        Ok(pose)
    }

    /// Solve a target and arm a ticked move without emitting anything.
    ///
    /// Returns the number of steps [`tick`](Self::tick) will emit. Zero means
    /// the arm already stands at the target.
    ///
    /// # Errors
    ///
    /// - `Error::Motion(Busy)` if a move is already in progress
    /// - `Error::Kinematics` if the target cannot be reached (state unchanged)
    pub fn start_move(&mut self, target: &CartesianTarget) -> Result<u16> {
        self.begin_move(target).map(|(_, total)| total)
    }

    fn begin_move(&mut self, target: &CartesianTarget) -> Result<(JointPose, u16)> {
        if self.interpolator.is_moving() {
            return Err(Error::Motion(MotionError::Busy));
        }

        let pose = self.solve(target)?;
        let total = self.interpolator.begin(pose)?;
        info!(
            "move to ({}, {}, {}) over {} steps",
            target.x, target.y, target.z, total
        );
        Ok((pose, total))
    }

    /// Emit exactly one step of the move in progress.
    ///
    /// No delay is applied; the caller paces the ticks.
    ///
    /// # Errors
    ///
    /// - `Error::Motion(NoActiveMove)` if nothing is in progress
    /// - `Error::Actuator` if the sink rejects a command; the move is aborted
    ///   and the last fully emitted step becomes the current pose
    pub fn tick(&mut self) -> Result<MotionStatus> {
        let pose = self
            .interpolator
            .next_pose()
            .ok_or(MotionError::NoActiveMove)?;

        if let Err(e) = self.emit(&pose) {
            self.interpolator.abort();
            return Err(e);
        }

        if self.interpolator.advance() {
            let (step, total) = self.interpolator.progress().unwrap_or((0, 0));
            Ok(MotionStatus::Moving { step, total })
        } else {
            debug!("move complete");
            Ok(MotionStatus::Complete)
        }
    }

    /// Stop a ticked move, keeping the last emitted step as the current pose.
    ///
    /// Returns the pose the arm was left at.
    pub fn abort(&mut self) -> Option<JointPose> {
        if self.interpolator.is_moving() {
            info!("move aborted");
        }
        self.interpolator.abort()
    }

    /// Open the gripper.
    ///
    /// # Errors
    ///
    /// Returns `Error::Motion(Busy)` during a ticked move, or the gripper's error.
    pub fn grip_open(&mut self) -> Result<()> {
        self.grip(GripAction::Open)
    }

    /// Close the gripper.
    ///
    /// # Errors
    ///
    /// Returns `Error::Motion(Busy)` during a ticked move, or the gripper's error.
    pub fn grip_close(&mut self) -> Result<()> {
        self.grip(GripAction::Close)
    }

    /// Perform a gripper action. The arm's motion state is never touched.
    ///
    /// # Errors
    ///
    /// Returns `Error::Motion(Busy)` during a ticked move, or the gripper's error.
    pub fn grip(&mut self, action: GripAction) -> Result<()> {
        if self.interpolator.is_moving() {
            return Err(Error::Motion(MotionError::Busy));
        }

        info!("gripper {}", action_name(action));
        self.gripper.actuate(action, &mut self.sink, &mut self.delay)
    }

    /// Move to a named pose (blocking).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PoseNotFound` for an unknown name, otherwise as
    /// [`move_to`](Self::move_to).
    pub fn move_to_pose(&mut self, name: &str) -> Result<JointPose> {
        let target = *self.poses.pose(name).ok_or_else(|| {
            Error::Config(ConfigError::PoseNotFound(
                heapless::String::try_from(name).unwrap_or_default(),
            ))
        })?;

        self.move_to_target(&target)
    }

    /// Run a named sequence to completion (blocking).
    ///
    /// Pose references and targets are checked before the first step, so a
    /// sequence that cannot complete emits nothing. At run time the first
    /// failing step stops the sequence and its error is returned.
    ///
    /// # Errors
    ///
    /// - `ConfigError::SequenceNotFound` for an unknown name
    /// - `Error::Motion(Busy)` if a ticked move is in progress
    /// - any error of [`PoseRegistry::check_sequence`]
    /// - any error of the failing step
    pub fn run_sequence(&mut self, name: &str) -> Result<()> {
        if self.interpolator.is_moving() {
            return Err(Error::Motion(MotionError::Busy));
        }

        let sequence = self.poses.sequence(name).cloned().ok_or_else(|| {
            Error::Config(ConfigError::SequenceNotFound(
                heapless::String::try_from(name).unwrap_or_default(),
            ))
        })?;
        self.poses.check_sequence(name, &sequence, &self.geometry)?;

        info!("sequence {} ({} steps)", name, sequence.steps.len());
        for step in &sequence.steps {
            match step {
                SequenceStep::Pose(pose) => {
                    self.move_to_pose(pose)?;
                }
                SequenceStep::Target(target) => {
                    self.move_to_target(target)?;
                }
                SequenceStep::Grip(action) => self.grip(*action)?,
                SequenceStep::DwellMs(ms) => self.delay.delay_ms(*ms),
            }
        }

        Ok(())
    }

    // Shoulder, upper, lower; stops at the first rejected write.
    fn emit(&mut self, pose: &JointPose) -> Result<()> {
        let joints = [self.channels.shoulder, self.channels.upper, self.channels.lower];

        for (calibration, angle) in joints.iter().zip(pose.angles()) {
            let command = calibration.to_command(angle);
            self.sink
                .set_command(calibration.channel, command)
                .map_err(|_| {
                    warn!("sink rejected command on channel {}", calibration.channel);
                    Error::Actuator {
                        channel: calibration.channel,
                    }
                })?;
        }

        Ok(())
    }
}

fn action_name(action: GripAction) -> &'static str {
    match action {
        GripAction::Open => "open",
        GripAction::Close => "close",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChannelCalibration, MotionConfig};
    use crate::gripper::DirectGripper;
    use crate::motion::{Easing, MotionExecutor};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    /// Records every write; fails the write with the given 1-based index.
    #[derive(Default)]
    struct FlakySink {
        writes: Vec<(u8, u16)>,
        fail_at: Option<usize>,
    }

    impl ActuatorSink for FlakySink {
        type Error = ();

        fn set_command(&mut self, channel: u8, command: u16) -> core::result::Result<(), ()> {
            if self.fail_at == Some(self.writes.len() + 1) {
                self.fail_at = None;
                return Err(());
            }
            self.writes.push((channel, command));
            Ok(())
        }
    }

    fn channels() -> ChannelMap {
        ChannelMap {
            shoulder: ChannelCalibration::new(0, 150, 600),
            upper: ChannelCalibration::new(1, 150, 600),
            lower: ChannelCalibration::new(2, 150, 600),
            gripper: ChannelCalibration::new(3, 150, 600),
        }
    }

    fn arm(steps: u16) -> RobotArm<FlakySink, NoopDelay, DirectGripper> {
        RobotArm::builder()
            .geometry(LinkGeometry::new(10.0, 10.0).unwrap())
            .channels(channels())
            .motion(MotionConfig {
                steps,
                step_delay_ms: 0,
                easing: Easing::Linear,
            })
            .sink(FlakySink::default())
            .delay(NoopDelay::new())
            .gripper(DirectGripper::new(3, 150, 375))
            .build()
            .unwrap()
    }

    #[test]
    fn test_tick_without_move() {
        let mut arm = arm(4);
        assert_eq!(arm.tick(), Err(Error::Motion(MotionError::NoActiveMove)));
    }

    #[test]
    fn test_ticked_move_reports_progress() {
        let mut arm = arm(3);
        arm.move_to(14.142136, 0.0, 0.0).unwrap();

        assert_eq!(arm.start_move(&CartesianTarget::new(0.0, 14.142136, 0.0)).unwrap(), 3);
        assert!(arm.is_moving());
        assert_eq!(arm.tick().unwrap(), MotionStatus::Moving { step: 1, total: 3 });
        assert_eq!(arm.tick().unwrap(), MotionStatus::Moving { step: 2, total: 3 });
        assert_eq!(arm.tick().unwrap(), MotionStatus::Complete);
        assert!(!arm.is_moving());
        assert_eq!(arm.tick(), Err(Error::Motion(MotionError::NoActiveMove)));
    }

    #[test]
    fn test_busy_rejects_moves_and_grips() {
        let mut arm = arm(4);
        arm.move_to(14.142136, 0.0, 0.0).unwrap();
        arm.start_move(&CartesianTarget::new(10.0, 5.0, 2.0)).unwrap();
        arm.tick().unwrap();
        let writes = arm.sink().writes.len();

        assert_eq!(
            arm.start_move(&CartesianTarget::new(5.0, 5.0, 5.0)),
            Err(Error::Motion(MotionError::Busy))
        );
        assert_eq!(arm.move_to(5.0, 5.0, 5.0), Err(Error::Motion(MotionError::Busy)));
        assert_eq!(arm.grip_close(), Err(Error::Motion(MotionError::Busy)));
        assert_eq!(arm.sink().writes.len(), writes);
        assert_eq!(arm.interpolator.progress(), Some((1, 4)));
    }

    #[test]
    fn test_abort_keeps_last_emitted_pose() {
        let mut arm = arm(4);
        let start = arm.move_to(14.142136, 0.0, 0.0).unwrap();
        let target = arm.solve(&CartesianTarget::new(0.0, 14.142136, 0.0)).unwrap();

        arm.start_move(&CartesianTarget::new(0.0, 14.142136, 0.0)).unwrap();
        arm.tick().unwrap();
        arm.tick().unwrap();
        let left_at = arm.abort().unwrap();

        let expected = MotionExecutor::new(start, target, 4, Easing::Linear).pose_at(2);
        assert_eq!(left_at, expected);
        assert_eq!(arm.current_pose(), Some(expected));
        assert!(matches!(arm.state(), MotionState::Idle { .. }));
    }

    #[test]
    fn test_sink_failure_mid_move() {
        let mut arm = arm(4);
        let start = arm.move_to(14.142136, 0.0, 0.0).unwrap();
        let target = arm.solve(&CartesianTarget::new(0.0, 14.142136, 0.0)).unwrap();

        // Writes 1-3 were the snap; 4-6 are step one; 8 is upper of step two.
        arm.sink_mut().fail_at = Some(8);
        let result = arm.move_to(0.0, 14.142136, 0.0);

        assert_eq!(result, Err(Error::Actuator { channel: 1 }));
        assert!(!arm.is_moving());
        let expected = MotionExecutor::new(start, target, 4, Easing::Linear).pose_at(1);
        assert_eq!(arm.current_pose(), Some(expected));
        assert_eq!(arm.sink().writes.len(), 7);
    }

    #[test]
    fn test_unknown_pose_and_sequence() {
        let mut arm = arm(4);
        assert!(matches!(
            arm.move_to_pose("home"),
            Err(Error::Config(ConfigError::PoseNotFound(_)))
        ));
        assert!(matches!(
            arm.run_sequence("pick"),
            Err(Error::Config(ConfigError::SequenceNotFound(_)))
        ));
        assert!(arm.sink().writes.is_empty());
    }

    #[test]
    fn test_tool_position_follows_pose() {
        let mut arm = arm(4);
        assert_eq!(arm.tool_position(), None);
        arm.move_to(8.0, 6.0, 5.0).unwrap();
        let tool = arm.tool_position().unwrap();
        assert!(libm::fabsf(tool.x - 8.0) < 1e-3);
        assert!(libm::fabsf(tool.y - 6.0) < 1e-3);
        assert!(libm::fabsf(tool.z - 5.0) < 1e-3);
    }

    #[test]
    fn test_register_rejects_unreachable_pose() {
        let mut arm = arm(4);
        assert!(matches!(
            arm.register_pose("far", CartesianTarget::new(50.0, 0.0, 0.0)),
            Err(Error::Config(ConfigError::UnreachablePose(n))) if n.as_str() == "far"
        ));
        assert!(!arm.poses().contains_pose("far"));

        arm.register_pose("near", CartesianTarget::new(14.0, 0.0, 2.0))
            .unwrap();
        assert!(arm.poses().contains_pose("near"));
    }

    fn pick_and_drop() -> SequenceConfig {
        let mut steps = heapless::Vec::new();
        steps.push(SequenceStep::Grip(GripAction::Close)).unwrap();
        steps
            .push(SequenceStep::Target(CartesianTarget::new(14.0, 0.0, 2.0)))
            .unwrap();
        steps
            .push(SequenceStep::Pose(heapless::String::try_from("drop").unwrap()))
            .unwrap();
        SequenceConfig { steps }
    }

    #[test]
    fn test_register_rejects_broken_sequence() {
        let mut arm = arm(4);
        assert!(matches!(
            arm.register_sequence("bad", pick_and_drop()),
            Err(Error::Config(ConfigError::PoseNotFound(n))) if n.as_str() == "drop"
        ));
        assert!(arm.poses().sequence("bad").is_none());
    }

    #[test]
    fn test_broken_sequence_emits_nothing() {
        let mut arm = arm(4);
        arm.poses
            .register_sequence("bad", pick_and_drop())
            .unwrap();

        assert!(matches!(
            arm.run_sequence("bad"),
            Err(Error::Config(ConfigError::PoseNotFound(n))) if n.as_str() == "drop"
        ));
        assert!(arm.sink().writes.is_empty());
        assert_eq!(arm.current_pose(), None);
    }

    #[test]
    fn test_registered_sequence_runs() {
        let mut arm = arm(4);
        arm.register_pose("drop", CartesianTarget::new(8.0, 6.0, 5.0))
            .unwrap();
        arm.register_sequence("pick", pick_and_drop())
            .unwrap();

        arm.run_sequence("pick").unwrap();
        // Grip, snap to the target, four steps to the pose
        assert_eq!(arm.sink().writes.len(), 1 + 3 + 4 * 3);
        assert_eq!(arm.sink().writes[0], (3, 375));
    }
}
