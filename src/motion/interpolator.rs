//! Trajectory interpolator - owns the arm's current pose across moves.

use super::executor::MotionExecutor;
use crate::config::MotionConfig;
use crate::error::MotionError;
use crate::kinematics::JointPose;

/// Motion state of the arm.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionState {
    /// No move has completed yet; the physical pose is unknown.
    Uninitialized,
    /// At rest at `current`.
    Idle {
        /// Last commanded pose.
        current: JointPose,
    },
    /// A move is in progress.
    Moving(MotionExecutor),
}

impl MotionState {
    /// State name for display/debugging.
    pub fn name(&self) -> &'static str {
        match self {
            MotionState::Uninitialized => "Uninitialized",
            MotionState::Idle { .. } => "Idle",
            MotionState::Moving(_) => "Moving",
        }
    }
}

/// Advances the commanded pose toward solved targets over a fixed number of steps.
///
/// The first move after construction jumps straight to its target (one emitted
/// step) instead of sweeping from an unknown startup pose.
#[derive(Debug, Clone)]
pub struct TrajectoryInterpolator {
    config: MotionConfig,
    state: MotionState,
}

impl TrajectoryInterpolator {
    /// Create an interpolator in the `Uninitialized` state.
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            state: MotionState::Uninitialized,
        }
    }

    /// Get the motion configuration.
    #[inline]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Check if a move is in progress.
    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.state, MotionState::Moving(_))
    }

    /// Last commanded pose, `None` before anything was emitted.
    pub fn current_pose(&self) -> Option<JointPose> {
        match &self.state {
            MotionState::Uninitialized => None,
            MotionState::Idle { current } => Some(*current),
            MotionState::Moving(executor) => executor
                .last_emitted()
                .or_else(|| (!executor.is_snap()).then(|| executor.start())),
        }
    }

    /// Arm a move toward `target`.
    ///
    /// Returns the number of steps that will be emitted. Zero means the arm is
    /// already at `target` and the state stays `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::Busy` if a move is already in progress.
    pub fn begin(&mut self, target: JointPose) -> Result<u16, MotionError> {
        let executor = match &self.state {
            MotionState::Moving(_) => return Err(MotionError::Busy),
            MotionState::Uninitialized => MotionExecutor::snap(target),
            MotionState::Idle { current } => {
                MotionExecutor::new(*current, target, self.config.steps, self.config.easing)
            }
        };

        let total = executor.total_steps();
        if executor.is_complete() {
            self.state = MotionState::Idle { current: target };
        } else {
            self.state = MotionState::Moving(executor);
        }
        Ok(total)
    }

    /// Pose of the next step to emit, `None` when not moving.
    pub fn next_pose(&self) -> Option<JointPose> {
        match &self.state {
            MotionState::Moving(executor) => executor.peek(),
            _ => None,
        }
    }

    /// Mark the pose from [`next_pose`](Self::next_pose) as emitted.
    ///
    /// Returns `true` if more steps remain. The final step moves the state to
    /// `Idle` at the target.
    pub fn advance(&mut self) -> bool {
        let MotionState::Moving(executor) = &mut self.state else {
            return false;
        };

        if executor.advance() {
            return true;
        }

        let target = executor.target();
        self.state = MotionState::Idle { current: target };
        false
    }

    /// Step progress of the move in flight as `(emitted, total)`.
    pub fn progress(&self) -> Option<(u16, u16)> {
        match &self.state {
            MotionState::Moving(executor) => Some((executor.current_step(), executor.total_steps())),
            _ => None,
        }
    }

    /// Abandon the move in flight, adopting the last emitted pose as current.
    ///
    /// Returns the pose the arm was left at, `None` if it is still uninitialized.
    pub fn abort(&mut self) -> Option<JointPose> {
        if let MotionState::Moving(executor) = &self.state {
            self.state = match executor.last_emitted() {
                Some(pose) => MotionState::Idle { current: pose },
                None if executor.is_snap() => MotionState::Uninitialized,
                None => MotionState::Idle {
                    current: executor.start(),
                },
            };
        }
        self.current_pose()
    }
}
