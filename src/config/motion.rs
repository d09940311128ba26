//! Motion timing configuration.

use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};
use crate::motion::Easing;

/// How a move is sliced into emitted steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Number of interpolation steps per move.
    #[serde(default = "default_steps")]
    pub steps: u16,

    /// Delay after each emitted step (milliseconds).
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u32,

    /// Easing curve applied to the interpolation fraction.
    #[serde(default)]
    pub easing: Easing,
}

fn default_steps() -> u16 {
    60
}

fn default_step_delay_ms() -> u32 {
    20
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            step_delay_ms: default_step_delay_ms(),
            easing: Easing::default(),
        }
    }
}

impl MotionConfig {
    /// Total blocking time of one full move (milliseconds).
    pub fn move_duration_ms(&self) -> u32 {
        self.step_delay_ms.saturating_mul(self.steps as u32)
    }

    /// Check the step count is usable.
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(Error::Config(ConfigError::InvalidStepCount(self.steps)));
        }
        Ok(())
    }
}
