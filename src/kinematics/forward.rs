//! Forward kinematics, the inverse of [`solve`](super::solve).

use libm::{cosf, sinf};

use super::pose::{CartesianTarget, JointPose};
use crate::config::LinkGeometry;

/// Tool point position for a joint pose.
///
/// Uses the same joint conventions as the solver: the upper arm's elevation
/// is `180° - upper` and the forearm points along `lower - upper`.
pub fn forward(pose: &JointPose, geometry: &LinkGeometry) -> CartesianTarget {
    let shoulder = pose.shoulder().to_radians();
    let upper = pose.upper().to_radians();
    let lower = pose.lower().to_radians();

    let l1 = geometry.upper_arm();
    let l2 = geometry.lower_arm();

    let forearm = lower - upper;
    let d = -l1 * cosf(upper) + l2 * cosf(forearm);
    let z = l1 * sinf(upper) + l2 * sinf(forearm);

    CartesianTarget {
        x: d * cosf(shoulder),
        y: d * sinf(shoulder),
        z,
    }
}

/// Elbow pivot position for a joint pose.
pub fn elbow_position(pose: &JointPose, geometry: &LinkGeometry) -> CartesianTarget {
    let shoulder = pose.shoulder().to_radians();
    let upper = pose.upper().to_radians();
    let l1 = geometry.upper_arm();

    let d = -l1 * cosf(upper);
    CartesianTarget {
        x: d * cosf(shoulder),
        y: d * sinf(shoulder),
        z: l1 * sinf(upper),
    }
}
