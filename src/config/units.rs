//! Unit types for physical quantities.
//!
//! Joint angles travel through the crate as [`Degrees`] so radians from the
//! solver's trigonometry never reach a servo channel by accident.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

/// Lower bound of the logical servo sweep.
pub const JOINT_MIN: Degrees = Degrees(0.0);

/// Upper bound of the logical servo sweep.
pub const JOINT_MAX: Degrees = Degrees(180.0);

/// Angular position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to radians.
    #[inline]
    pub fn to_radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Create from radians.
    #[inline]
    pub fn from_radians(radians: f32) -> Self {
        Self(radians.to_degrees())
    }

    /// Saturate into the joint sweep `[0, 180]`.
    ///
    /// NaN saturates to 0.
    #[inline]
    pub fn clamp_to_joint(self) -> Self {
        if self.0.is_nan() {
            return JOINT_MIN;
        }
        Self(self.0.clamp(JOINT_MIN.0, JOINT_MAX.0))
    }

    /// Check if the angle lies in the joint sweep.
    #[inline]
    pub fn is_within_joint(self) -> bool {
        self.0 >= JOINT_MIN.0 && self.0 <= JOINT_MAX.0
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f32> for Degrees {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_conversion() {
        let d = Degrees::new(180.0);
        assert!((d.to_radians() - core::f32::consts::PI).abs() < 0.0001);
        assert!((Degrees::from_radians(core::f32::consts::FRAC_PI_2).value() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_to_joint() {
        assert_eq!(Degrees(-12.0).clamp_to_joint(), JOINT_MIN);
        assert_eq!(Degrees(200.0).clamp_to_joint(), JOINT_MAX);
        assert_eq!(Degrees(45.0).clamp_to_joint(), Degrees(45.0));
        assert_eq!(Degrees(f32::NAN).clamp_to_joint(), JOINT_MIN);
    }

    #[test]
    fn test_arithmetic() {
        let a = Degrees::new(30.0);
        let b = Degrees::new(90.0);
        assert_eq!((b - a) * 0.5 + a, Degrees(60.0));
    }
}
