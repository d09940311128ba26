//! Closed-form inverse kinematics for the yaw + two-link pitch arm.
//!
//! Joint conventions (servo frame, degrees):
//! - `shoulder` is the yaw of the arm plane, `atan2(y, x)`.
//! - `upper` is measured from the backward horizontal, so the upper arm's
//!   elevation above the forward horizontal is `180° - upper`.
//! - `lower` is the interior angle at the elbow between the two links.
//!
//! Of the two elbow solutions only the elbow-up one (non-negative `acos`
//! branch, elbow above the shoulder-to-target line) is produced.

use core::f32::consts::PI;

use libm::{acosf, atan2f, cosf, sinf};

use super::pose::{CartesianTarget, JointPose};
use crate::config::units::Degrees;
use crate::config::LinkGeometry;
use crate::error::KinematicsError;

/// Joint angles in radians before saturation into the servo sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSolution {
    /// Shoulder yaw.
    pub shoulder: f32,
    /// Upper arm, measured from the backward horizontal.
    pub upper: f32,
    /// Interior elbow angle.
    pub lower: f32,
}

impl RawSolution {
    /// Convert to degrees and saturate each joint into `[0, 180]`.
    pub fn to_pose(&self) -> JointPose {
        JointPose::new(
            Degrees::from_radians(self.shoulder),
            Degrees::from_radians(self.upper),
            Degrees::from_radians(self.lower),
        )
    }

    /// Check whether saturation would alter any joint.
    pub fn needs_clamping(&self) -> bool {
        [self.shoulder, self.upper, self.lower]
            .iter()
            .any(|&rad| !Degrees::from_radians(rad).is_within_joint())
    }
}

/// Relative slack on the squared reach bounds.
///
/// Targets built from trigonometry land a few ulps off the boundary sphere;
/// those still count as reachable and the `acos` clamp absorbs the rest.
pub const REACH_TOLERANCE: f32 = 1e-5;

/// Check whether a target lies inside the reachable annulus.
pub fn is_reachable(target: &CartesianTarget, geometry: &LinkGeometry) -> bool {
    check_reach(target, geometry).is_ok()
}

fn check_reach(target: &CartesianTarget, geometry: &LinkGeometry) -> Result<f32, KinematicsError> {
    if !target.is_finite() {
        return Err(KinematicsError::NonFiniteTarget);
    }

    let max_reach = geometry.max_reach();
    let min_reach = geometry.min_reach();
    let squared = target.distance_squared();

    if squared > max_reach * max_reach * (1.0 + REACH_TOLERANCE) {
        return Err(KinematicsError::Unreachable {
            distance: libm::sqrtf(squared),
            max_reach,
        });
    }
    if squared < min_reach * min_reach * (1.0 - REACH_TOLERANCE) {
        return Err(KinematicsError::InsideDeadZone {
            distance: libm::sqrtf(squared),
            min_reach,
        });
    }

    Ok(libm::sqrtf(squared))
}

/// Solve joint angles in radians without saturating them.
///
/// # Errors
///
/// - `Unreachable` when the target is farther than `L1 + L2`
/// - `InsideDeadZone` when the target is closer than `|L1 - L2|`
/// - `NonFiniteTarget` for NaN or infinite coordinates
pub fn solve_raw(
    target: &CartesianTarget,
    geometry: &LinkGeometry,
) -> Result<RawSolution, KinematicsError> {
    check_reach(target, geometry)?;

    let l1 = geometry.upper_arm();
    let l2 = geometry.lower_arm();
    let CartesianTarget { x, y, z } = *target;

    let shoulder = atan2f(y, x);
    let d = target.horizontal_reach();

    // Reach checks above already rejected real domain violations; the clamp
    // only absorbs rounding right at the annulus boundaries.
    let cos_lower = ((l1 * l1 + l2 * l2 - d * d - z * z) / (2.0 * l1 * l2)).clamp(-1.0, 1.0);
    let lower = acosf(cos_lower);

    let k1 = l1 + l2 * cosf(PI - lower);
    let k2 = l2 * sinf(PI - lower);
    let upper = PI - atan2f(z, d) - atan2f(k2, k1);

    Ok(RawSolution {
        shoulder,
        upper,
        lower,
    })
}

/// Solve the joint pose for a Cartesian target.
///
/// Angles outside the servo sweep are silently saturated to `[0, 180]`.
///
/// # Errors
///
/// See [`solve_raw`]. Errors are returned before any state is touched.
pub fn solve(target: &CartesianTarget, geometry: &LinkGeometry) -> Result<JointPose, KinematicsError> {
    solve_raw(target, geometry).map(|raw| raw.to_pose())
}
