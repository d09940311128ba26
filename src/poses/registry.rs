//! Pose registry for named target and sequence lookup.

use heapless::{FnvIndexMap, String};

use crate::config::{ArmConfig, LinkGeometry, SequenceConfig, MAX_POSES, MAX_SEQUENCES};
use crate::error::{ConfigError, Error, Result};
use crate::kinematics::{is_reachable, CartesianTarget};

/// Registry for named poses and sequences.
#[derive(Debug, Clone, Default)]
pub struct PoseRegistry {
    poses: FnvIndexMap<String<32>, CartesianTarget, MAX_POSES>,
    sequences: FnvIndexMap<String<32>, SequenceConfig, MAX_SEQUENCES>,
}

fn key(name: &str) -> Result<String<32>> {
    String::try_from(name).map_err(|_| Error::Config(ConfigError::NameTooLong))
}

fn unreachable(name: &str) -> Error {
    Error::Config(ConfigError::UnreachablePose(
        String::try_from(name).unwrap_or_default(),
    ))
}

impl PoseRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load poses and sequences from an `ArmConfig`.
    pub fn from_config(config: &ArmConfig) -> Self {
        Self {
            poses: config.poses.clone(),
            sequences: config.sequences.clone(),
        }
    }

    /// Register a pose, replacing any pose with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too long or the registry is full.
    pub fn register_pose(&mut self, name: &str, target: CartesianTarget) -> Result<()> {
        self.poses
            .insert(key(name)?, target)
            .map_err(|_| Error::Config(ConfigError::RegistryFull))?;
        Ok(())
    }

    /// Register a sequence, replacing any sequence with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too long or the registry is full.
    pub fn register_sequence(&mut self, name: &str, sequence: SequenceConfig) -> Result<()> {
        self.sequences
            .insert(key(name)?, sequence)
            .map_err(|_| Error::Config(ConfigError::RegistryFull))?;
        Ok(())
    }

    /// Check every pose is reachable and every sequence can run.
    ///
    /// # Errors
    ///
    /// The first failure of [`check_sequence`](Self::check_sequence), or
    /// `UnreachablePose` naming a pose outside the arm's reach.
    pub fn validate(&self, geometry: &LinkGeometry) -> Result<()> {
        for (name, target) in self.poses.iter() {
            if !is_reachable(target, geometry) {
                return Err(unreachable(name));
            }
        }

        for (name, sequence) in self.sequences.iter() {
            self.check_sequence(name, sequence, geometry)?;
        }

        Ok(())
    }

    /// Check a sequence against the registered poses without running it.
    ///
    /// # Errors
    ///
    /// - `EmptySequence` if it has no steps
    /// - `PoseNotFound` for a pose name that is not registered
    /// - `UnreachablePose` naming a referenced pose out of reach, or the
    ///   sequence itself when an inline target is out of reach
    pub fn check_sequence(
        &self,
        name: &str,
        sequence: &SequenceConfig,
        geometry: &LinkGeometry,
    ) -> Result<()> {
        if sequence.steps.is_empty() {
            return Err(Error::Config(ConfigError::EmptySequence(
                String::try_from(name).unwrap_or_default(),
            )));
        }

        for pose in sequence.pose_refs() {
            let target = self.pose(pose).ok_or_else(|| {
                Error::Config(ConfigError::PoseNotFound(
                    String::try_from(pose).unwrap_or_default(),
                ))
            })?;
            if !is_reachable(target, geometry) {
                return Err(unreachable(pose));
            }
        }

        // Inline targets have no name of their own
        if sequence.targets().any(|target| !is_reachable(target, geometry)) {
            return Err(unreachable(name));
        }

        Ok(())
    }

    /// Get a pose by name.
    pub fn pose(&self, name: &str) -> Option<&CartesianTarget> {
        self.poses.get(&key(name).ok()?)
    }

    /// Get a sequence by name.
    pub fn sequence(&self, name: &str) -> Option<&SequenceConfig> {
        self.sequences.get(&key(name).ok()?)
    }

    /// Check if a pose exists.
    pub fn contains_pose(&self, name: &str) -> bool {
        self.pose(name).is_some()
    }

    /// Remove a pose by name.
    pub fn remove_pose(&mut self, name: &str) -> Option<CartesianTarget> {
        self.poses.remove(&key(name).ok()?)
    }

    /// Get the number of registered poses.
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Check if no poses are registered.
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Get an iterator over pose names.
    pub fn pose_names(&self) -> impl Iterator<Item = &str> {
        self.poses.keys().map(|s| s.as_str())
    }

    /// Get an iterator over sequence names.
    pub fn sequence_names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GripAction, SequenceStep};

    fn steps(steps: &[SequenceStep]) -> SequenceConfig {
        SequenceConfig {
            steps: heapless::Vec::from_slice(steps).unwrap(),
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PoseRegistry::new();
        assert!(registry.is_empty());

        registry
            .register_pose("zero", CartesianTarget::new(14.0, 0.0, 5.0))
            .unwrap();
        registry
            .register_pose("zero", CartesianTarget::new(12.0, 0.0, 5.0))
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains_pose("zero"));
        assert_eq!(registry.pose("zero").unwrap().x, 12.0);
        assert!(registry.pose("missing").is_none());
        assert_eq!(registry.remove_pose("zero").unwrap().x, 12.0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_name_too_long() {
        let mut registry = PoseRegistry::new();
        let name = "a_pose_name_that_is_far_longer_than_32_bytes";
        assert_eq!(
            registry.register_pose(name, CartesianTarget::default()),
            Err(Error::Config(ConfigError::NameTooLong))
        );
        assert!(!registry.contains_pose(name));
    }

    #[test]
    fn test_registry_full() {
        let mut registry = PoseRegistry::new();
        for i in 0..MAX_POSES {
            let mut name: String<32> = String::new();
            core::fmt::Write::write_fmt(&mut name, format_args!("p{}", i)).unwrap();
            registry
                .register_pose(&name, CartesianTarget::default())
                .unwrap();
        }
        assert_eq!(
            registry.register_pose("one_more", CartesianTarget::default()),
            Err(Error::Config(ConfigError::RegistryFull))
        );
    }

    #[test]
    fn test_sequences() {
        let mut registry = PoseRegistry::new();
        let mut steps = heapless::Vec::new();
        steps.push(SequenceStep::Grip(GripAction::Open)).unwrap();
        registry
            .register_sequence("release", SequenceConfig { steps })
            .unwrap();

        assert_eq!(registry.sequence("release").unwrap().steps.len(), 1);
        assert_eq!(registry.sequence_names().collect::<std::vec::Vec<_>>(), ["release"]);
    }

    #[test]
    fn test_check_sequence() {
        let geometry = LinkGeometry::new(10.0, 10.0).unwrap();
        let mut registry = PoseRegistry::new();
        registry
            .register_pose("home", CartesianTarget::new(14.0, 0.0, 5.0))
            .unwrap();
        registry
            .register_pose("far", CartesianTarget::new(50.0, 0.0, 0.0))
            .unwrap();

        let good = steps(&[
            SequenceStep::Pose(String::try_from("home").unwrap()),
            SequenceStep::Target(CartesianTarget::new(8.0, 6.0, 5.0)),
            SequenceStep::Grip(GripAction::Close),
        ]);
        assert_eq!(registry.check_sequence("good", &good, &geometry), Ok(()));

        let empty = steps(&[]);
        assert!(matches!(
            registry.check_sequence("empty", &empty, &geometry),
            Err(Error::Config(ConfigError::EmptySequence(n))) if n.as_str() == "empty"
        ));

        let missing = steps(&[SequenceStep::Pose(String::try_from("missing").unwrap())]);
        assert!(matches!(
            registry.check_sequence("bad", &missing, &geometry),
            Err(Error::Config(ConfigError::PoseNotFound(n))) if n.as_str() == "missing"
        ));

        let far_pose = steps(&[SequenceStep::Pose(String::try_from("far").unwrap())]);
        assert!(matches!(
            registry.check_sequence("bad", &far_pose, &geometry),
            Err(Error::Config(ConfigError::UnreachablePose(n))) if n.as_str() == "far"
        ));

        let far_target = steps(&[SequenceStep::Target(CartesianTarget::new(30.0, 0.0, 0.0))]);
        assert!(matches!(
            registry.check_sequence("reach", &far_target, &geometry),
            Err(Error::Config(ConfigError::UnreachablePose(n))) if n.as_str() == "reach"
        ));
    }

    #[test]
    fn test_validate_flags_unreachable_pose() {
        let geometry = LinkGeometry::new(10.0, 10.0).unwrap();
        let mut registry = PoseRegistry::new();
        registry
            .register_pose("home", CartesianTarget::new(14.0, 0.0, 5.0))
            .unwrap();
        assert_eq!(registry.validate(&geometry), Ok(()));

        registry
            .register_pose("far", CartesianTarget::new(50.0, 0.0, 0.0))
            .unwrap();
        assert!(matches!(
            registry.validate(&geometry),
            Err(Error::Config(ConfigError::UnreachablePose(n))) if n.as_str() == "far"
        ));
    }
}
