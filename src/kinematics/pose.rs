//! Joint-space and Cartesian pose types.

use serde::Deserialize;

use crate::config::units::Degrees;

/// Cartesian target relative to the shoulder pivot.
///
/// `x`/`y` span the horizontal plane (shoulder yaw rotates about `z`), `z` is height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CartesianTarget {
    /// Forward.
    pub x: f32,
    /// Sideways.
    pub y: f32,
    /// Up.
    pub z: f32,
}

impl CartesianTarget {
    /// Create a target.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance from the origin in the horizontal plane.
    #[inline]
    pub fn horizontal_reach(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Squared distance from the origin.
    #[inline]
    pub fn distance_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Straight-line distance from the origin.
    #[inline]
    pub fn distance(&self) -> f32 {
        libm::sqrtf(self.distance_squared())
    }

    /// Check all coordinates are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &CartesianTarget) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        libm::sqrtf(dx * dx + dy * dy + dz * dz)
    }
}

/// Commanded angles of the three arm joints, each within `[0, 180]` degrees.
///
/// Fields are private so every pose goes through the saturating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointPose {
    pub(crate) shoulder: Degrees,
    upper: Degrees,
    lower: Degrees,
}

impl JointPose {
    /// Create a pose, saturating each angle into the joint sweep.
    pub fn new(shoulder: Degrees, upper: Degrees, lower: Degrees) -> Self {
        Self {
            shoulder: shoulder.clamp_to_joint(),
            upper: upper.clamp_to_joint(),
            lower: lower.clamp_to_joint(),
        }
    }

    /// Pose with every joint at 90°.
    pub const fn centered() -> Self {
        Self {
            shoulder: Degrees(90.0),
            upper: Degrees(90.0),
            lower: Degrees(90.0),
        }
    }

    /// Shoulder yaw.
    #[inline]
    pub fn shoulder(&self) -> Degrees {
        self.shoulder
    }

    /// Upper arm pitch.
    #[inline]
    pub fn upper(&self) -> Degrees {
        self.upper
    }

    /// Lower arm (elbow) pitch.
    #[inline]
    pub fn lower(&self) -> Degrees {
        self.lower
    }

    /// Per-joint interpolation `self + (target - self) * s`, saturated.
    ///
    /// `s` in `[0, 1]` keeps the result between the two poses.
    pub fn lerp(&self, target: &JointPose, s: f32) -> JointPose {
        JointPose::new(
            self.shoulder + (target.shoulder - self.shoulder) * s,
            self.upper + (target.upper - self.upper) * s,
            self.lower + (target.lower - self.lower) * s,
        )
    }

    /// Angles in emit order: shoulder, upper, lower.
    #[inline]
    pub fn angles(&self) -> [Degrees; 3] {
        [self.shoulder, self.upper, self.lower]
    }

    /// Largest per-joint difference to another pose.
    pub fn max_delta(&self, other: &JointPose) -> f32 {
        self.angles()
            .iter()
            .zip(other.angles().iter())
            .map(|(a, b)| libm::fabsf(a.0 - b.0))
            .fold(0.0, f32::max)
    }
}
