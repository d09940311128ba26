//! Link geometry of the two pitch links.

use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

/// Lengths of the upper arm (L1) and lower arm (L2).
///
/// Both lengths share whatever unit the Cartesian targets use.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkGeometry {
    /// Shoulder pivot to elbow pivot (L1).
    #[serde(rename = "upper_arm_length")]
    upper_arm: f32,

    /// Elbow pivot to tool point (L2).
    #[serde(rename = "lower_arm_length")]
    lower_arm: f32,
}

impl LinkGeometry {
    /// Create a link geometry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLinkLength` if either length is not finite and positive.
    pub fn new(upper_arm: f32, lower_arm: f32) -> Result<Self> {
        let geometry = Self {
            upper_arm,
            lower_arm,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Upper arm length (L1).
    #[inline]
    pub fn upper_arm(&self) -> f32 {
        self.upper_arm
    }

    /// Lower arm length (L2).
    #[inline]
    pub fn lower_arm(&self) -> f32 {
        self.lower_arm
    }

    /// Full extension, L1 + L2.
    #[inline]
    pub fn max_reach(&self) -> f32 {
        self.upper_arm + self.lower_arm
    }

    /// Fully folded reach, |L1 - L2|.
    #[inline]
    pub fn min_reach(&self) -> f32 {
        libm::fabsf(self.upper_arm - self.lower_arm)
    }

    /// Check both lengths are finite and positive.
    ///
    /// Deserialized geometry bypasses [`LinkGeometry::new`], so validation runs this again.
    pub fn validate(&self) -> Result<()> {
        for length in [self.upper_arm, self.lower_arm] {
            if !length.is_finite() || length <= 0.0 {
                return Err(Error::Config(ConfigError::InvalidLinkLength(length)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_bounds() {
        let geometry = LinkGeometry::new(12.0, 8.0).unwrap();
        assert_eq!(geometry.max_reach(), 20.0);
        assert_eq!(geometry.min_reach(), 4.0);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        for (l1, l2) in [(0.0, 10.0), (10.0, -1.0), (f32::NAN, 10.0), (10.0, f32::INFINITY)] {
            assert!(matches!(
                LinkGeometry::new(l1, l2),
                Err(Error::Config(ConfigError::InvalidLinkLength(_)))
            ));
        }
    }
}
