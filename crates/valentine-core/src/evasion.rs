//! The decline button that runs away and the accept button that grows.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bounds and growth rate of the evasion interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvasionConfig {
    /// Horizontal offsets are drawn from `[-half_width, half_width]`.
    pub half_width: f64,
    /// Vertical offsets are drawn from `[-half_height, half_height]`.
    pub half_height: f64,
    /// Scale added to the accept control per attempt.
    pub scale_step: f64,
    /// Upper bound of the accept control scale.
    pub max_scale: f64,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        Self {
            half_width: 150.0,
            half_height: 100.0,
            scale_step: 0.1,
            max_scale: 2.5,
        }
    }
}

/// Offset of the decline control relative to its resting place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal displacement.
    pub x: f64,
    /// Vertical displacement.
    pub y: f64,
}

/// Transient state of the decline/accept pair. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasionState {
    config: EvasionConfig,
    offset: Offset,
    interactions: u32,
}

impl EvasionState {
    /// Fresh state at the origin.
    #[must_use]
    pub const fn new(config: EvasionConfig) -> Self {
        Self {
            config,
            offset: Offset { x: 0.0, y: 0.0 },
            interactions: 0,
        }
    }

    /// Register one decline hover/click: relocate and grow.
    pub fn on_decline_attempt<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Offset {
        self.interactions = self.interactions.saturating_add(1);
        self.offset = Offset {
            x: draw_symmetric(rng, self.config.half_width),
            y: draw_symmetric(rng, self.config.half_height),
        };
        self.offset
    }

    /// Back to the origin with no attempts recorded.
    pub const fn reset(&mut self) {
        self.offset = Offset { x: 0.0, y: 0.0 };
        self.interactions = 0;
    }

    /// Current decline offset.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Number of attempts so far.
    #[must_use]
    pub const fn interactions(&self) -> u32 {
        self.interactions
    }

    /// Accept control scale: `min(1 + k * step, max)`.
    #[must_use]
    pub fn accept_scale(&self) -> f64 {
        f64::from(self.interactions)
            .mul_add(self.config.scale_step, 1.0)
            .min(self.config.max_scale)
    }

    /// Label of the decline control.
    #[must_use]
    pub const fn decline_label(&self) -> &'static str {
        if self.interactions == 0 { "Not Today" } else { "Nice Try!" }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EvasionConfig {
        &self.config
    }
}

impl Default for EvasionState {
    fn default() -> Self {
        Self::new(EvasionConfig::default())
    }
}

fn draw_symmetric<R: Rng + ?Sized>(rng: &mut R, half: f64) -> f64 {
    if half <= 0.0 {
        return 0.0;
    }
    rng.random_range(-half..=half)
}
