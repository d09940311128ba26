//! Configuration validation.

use crate::error::Result;
use crate::poses::PoseRegistry;

use super::ArmConfig;

/// Validate an arm configuration.
///
/// Checks:
/// - Link lengths are finite and positive
/// - No two actuators share a channel
/// - Step count is at least 1
/// - Every named pose is reachable
/// - Sequences are non-empty, reference existing poses and reachable targets
pub fn validate_config(config: &ArmConfig) -> Result<()> {
    config.geometry.validate()?;
    config.channels.validate()?;
    config.motion.validate()?;

    PoseRegistry::from_config(config).validate(&config.geometry)
}
