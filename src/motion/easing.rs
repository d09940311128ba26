//! Easing curves for interpolation fraction remapping.

use core::f32::consts::PI;

use serde::Deserialize;

/// Remapping of the interpolation fraction `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant angular rate, `s(t) = t`.
    Linear,
    /// Cosine ease-in/ease-out, `s(t) = (1 - cos(πt)) / 2`.
    #[default]
    Cosine,
}

impl Easing {
    /// Apply the curve. `t` is clamped to `[0, 1]` first.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Cosine => (1.0 - libm::cosf(t * PI)) * 0.5,
        }
    }
}
