//! Motion execution - step-by-step pose generation for one move.

use super::easing::Easing;
use crate::kinematics::JointPose;

/// Runtime state of one move from a start pose to a target pose.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionExecutor {
    /// Pose at the start of the move.
    start: JointPose,

    /// Pose at the end of the move.
    target: JointPose,

    /// Easing applied to the step fraction.
    easing: Easing,

    /// Total number of steps to emit.
    total_steps: u16,

    /// Number of steps already emitted (0 to total_steps).
    current_step: u16,

    /// Move was issued from an uninitialized arm and jumps straight to target.
    snap: bool,
}

impl MotionExecutor {
    /// Create an executor interpolating over `steps` steps.
    ///
    /// A zero-delta move, or `steps == 0`, produces an executor that is
    /// complete from the start.
    pub fn new(start: JointPose, target: JointPose, steps: u16, easing: Easing) -> Self {
        let total_steps = if start == target { 0 } else { steps };
        Self {
            start,
            target,
            easing,
            total_steps,
            current_step: 0,
            snap: false,
        }
    }

    /// Create an executor that emits `target` once with no intermediate steps.
    pub fn snap(target: JointPose) -> Self {
        Self {
            start: target,
            target,
            easing: Easing::Linear,
            total_steps: 1,
            current_step: 0,
            snap: true,
        }
    }

    /// Check if every step has been emitted.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_step >= self.total_steps
    }

    /// Check if this is a first-move jump.
    #[inline]
    pub fn is_snap(&self) -> bool {
        self.snap
    }

    /// Get the start pose.
    #[inline]
    pub fn start(&self) -> JointPose {
        self.start
    }

    /// Get the target pose.
    #[inline]
    pub fn target(&self) -> JointPose {
        self.target
    }

    /// Get the number of steps emitted so far.
    #[inline]
    pub fn current_step(&self) -> u16 {
        self.current_step
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u16 {
        self.total_steps
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u16 {
        self.total_steps.saturating_sub(self.current_step)
    }

    /// Pose at step `i` of the move (`i = 0` is the start).
    ///
    /// The final step returns the target exactly.
    pub fn pose_at(&self, i: u16) -> JointPose {
        if i >= self.total_steps {
            return self.target;
        }
        if i == 0 {
            return self.start;
        }
        let t = i as f32 / self.total_steps as f32;
        self.start.lerp(&self.target, self.easing.apply(t))
    }

    /// Pose of the next step to emit, `None` once complete.
    pub fn peek(&self) -> Option<JointPose> {
        if self.is_complete() {
            None
        } else {
            Some(self.pose_at(self.current_step + 1))
        }
    }

    /// Pose of the last emitted step, `None` if nothing was emitted yet.
    pub fn last_emitted(&self) -> Option<JointPose> {
        if self.current_step == 0 {
            None
        } else {
            Some(self.pose_at(self.current_step))
        }
    }

    /// Mark the next step as emitted.
    ///
    /// Returns `true` if more steps remain, `false` if complete.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.current_step += 1;
        !self.is_complete()
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.total_steps == 0 {
            1.0
        } else {
            self.current_step as f32 / self.total_steps as f32
        }
    }
}
