//! Application settings: reveal timing, decline evasion, invitation origin.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
pub use valentine_core::EvasionConfig;

/// Origin used for invitation links when none is configured.
pub const DEFAULT_ORIGIN: &str = "https://valentine.example/";

/// Behavioural settings of the application layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reveal and confirmation delays.
    pub timing: TimingConfig,
    /// Decline-button evasion bounds.
    pub evasion: EvasionConfig,
    /// Invitation link settings.
    pub link: LinkConfig,
}

/// Timer durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between two revealed proposal lines.
    pub reveal_step_ms: u64,
    /// Time the acceptance screen stays up before the dashboard opens.
    pub confirmation_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reveal_step_ms: 3500,
            confirmation_ms: 4000,
        }
    }
}

impl TimingConfig {
    /// Reveal step delay.
    #[must_use]
    pub const fn reveal_step(&self) -> Duration {
        Duration::from_millis(self.reveal_step_ms)
    }

    /// Confirmation delay.
    #[must_use]
    pub const fn confirmation(&self) -> Duration {
        Duration::from_millis(self.confirmation_ms)
    }
}

/// Invitation link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Absolute URL the invitation parameters are appended to.
    pub origin: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_owned(),
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The reveal step must take some time.
    #[error("timing.reveal_step_ms must be greater than zero")]
    ZeroRevealStep,

    /// The acceptance screen must outlast a reveal step.
    #[error("timing.confirmation_ms ({confirmation}) must exceed timing.reveal_step_ms ({step})")]
    ConfirmationTooShort {
        /// Configured confirmation delay.
        confirmation: u64,
        /// Configured step delay.
        step: u64,
    },

    /// Offsets and growth must come from a finite, positive range.
    #[error("evasion.{field} must be a finite, positive number (got {value})")]
    InvalidRange {
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The decline control moves in a landscape box.
    #[error("evasion.half_height ({half_height}) must not exceed evasion.half_width ({half_width})")]
    HeightExceedsWidth {
        /// Configured vertical half range.
        half_height: f64,
        /// Configured horizontal half range.
        half_width: f64,
    },

    /// The accept control may not shrink.
    #[error("evasion.max_scale must be at least 1.0 (got {0})")]
    MaxScaleBelowOne(f64),

    /// The invitation origin must parse as an absolute URL.
    #[error("link.origin is not a usable URL: {0}")]
    InvalidOrigin(String),
}

impl AppConfig {
    /// Check cross-field constraints.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.reveal_step_ms == 0 {
            return Err(ConfigError::ZeroRevealStep);
        }
        if timing.confirmation_ms <= timing.reveal_step_ms {
            return Err(ConfigError::ConfirmationTooShort {
                confirmation: timing.confirmation_ms,
                step: timing.reveal_step_ms,
            });
        }

        let evasion = &self.evasion;
        for (field, value) in [
            ("half_width", evasion.half_width),
            ("half_height", evasion.half_height),
            ("scale_step", evasion.scale_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRange { field, value });
            }
        }
        if evasion.half_height > evasion.half_width {
            return Err(ConfigError::HeightExceedsWidth {
                half_height: evasion.half_height,
                half_width: evasion.half_width,
            });
        }
        if !evasion.max_scale.is_finite() || evasion.max_scale < 1.0 {
            return Err(ConfigError::MaxScaleBelowOne(evasion.max_scale));
        }

        valentine_core::link::encode("", "", &self.link.origin)
            .map(|_| ())
            .map_err(|err| ConfigError::InvalidOrigin(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(AppConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_document_fills_defaults() -> Result<(), toml::de::Error> {
        let config: AppConfig = toml::from_str("[timing]\nreveal_step_ms = 1000\n")?;
        assert_eq!(config.timing.reveal_step_ms, 1000);
        assert_eq!(config.timing.confirmation_ms, 4000);
        assert_eq!(config.link.origin, DEFAULT_ORIGIN);
        Ok(())
    }

    #[test]
    fn confirmation_must_outlast_step() {
        let mut config = AppConfig::default();
        config.timing.confirmation_ms = config.timing.reveal_step_ms;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConfirmationTooShort { .. })
        ));
    }

    #[test]
    fn rejects_bad_evasion_values() {
        let mut config = AppConfig::default();
        config.evasion.half_width = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { field: "half_width", .. })
        ));

        let mut config = AppConfig::default();
        config.evasion.max_scale = 0.5;
        assert_eq!(config.validate(), Err(ConfigError::MaxScaleBelowOne(0.5)));
    }

    #[test]
    fn rejects_zero_scale_step() {
        let mut config = AppConfig::default();
        config.evasion.scale_step = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                field: "scale_step",
                value: 0.0
            })
        );

        let mut config = AppConfig::default();
        config.evasion.half_width = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { field: "half_width", .. })
        ));
    }

    #[test]
    fn rejects_height_above_width() {
        let mut config = AppConfig::default();
        config.evasion.half_height = 500.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::HeightExceedsWidth {
                half_height: 500.0,
                half_width: 150.0
            })
        );

        config.evasion.half_height = config.evasion.half_width;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_unusable_origin() {
        let mut config = AppConfig::default();
        config.link.origin = "valentine".into();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidOrigin(_))));
    }
}
