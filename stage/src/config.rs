//! Zoom configuration parsed from environment variables or embedded documents.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{MAX_ZOOM_SCALE, MIN_ZOOM_SCALE, ORIGINAL_ZOOM_SCALE, ZOOM_STEP};

pub const ENV_ZOOM_STEP: &str = "STAGE_ZOOM_STEP";
pub const ENV_ZOOM_MIN: &str = "STAGE_ZOOM_MIN";
pub const ENV_ZOOM_MAX: &str = "STAGE_ZOOM_MAX";

/// Error returned when a zoom configuration is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// An environment value is not a number.
    #[error("{var} is not a number: {value:?}")]
    NotANumber { var: &'static str, value: String },
    /// The zoom step would not change the scale.
    #[error("zoom step must be finite and greater than 1, got {0}")]
    InvalidStep(f64),
    /// The scale bounds are empty, non-positive, or exclude the natural size.
    #[error("zoom bounds must satisfy 0 < min <= 1 <= max, got min {min} max {max}")]
    InvalidBounds { min: f64, max: f64 },
}

/// Discrete zoom behaviour of a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Factor applied per zoom step.
    pub step: f64,
    /// Lower scale bound.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self { step: ZOOM_STEP, min_scale: MIN_ZOOM_SCALE, max_scale: MAX_ZOOM_SCALE }
    }
}

impl ZoomConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `STAGE_ZOOM_STEP`: default 1.1
    /// - `STAGE_ZOOM_MIN`: default 0.1
    /// - `STAGE_ZOOM_MAX`: default 16
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value does not parse or the result fails [`ZoomConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        })
    }

    /// Build config from an arbitrary key lookup (environment, test maps).
    ///
    /// # Errors
    ///
    /// Same as [`ZoomConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            step: parse_f64(&lookup, ENV_ZOOM_STEP, defaults.step)?,
            min_scale: parse_f64(&lookup, ENV_ZOOM_MIN, defaults.min_scale)?,
            max_scale: parse_f64(&lookup, ENV_ZOOM_MAX, defaults.max_scale)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the step and bounds are usable.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidStep`] or [`ConfigError::InvalidBounds`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step.is_finite() || self.step <= 1.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        let bounds_ok = self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale <= ORIGINAL_ZOOM_SCALE
            && self.max_scale >= ORIGINAL_ZOOM_SCALE;
        if !bounds_ok {
            return Err(ConfigError::InvalidBounds { min: self.min_scale, max: self.max_scale });
        }
        Ok(())
    }

    /// Clamp a scale into the configured bounds.
    ///
    /// Never panics. On a config that fails [`ZoomConfig::validate`] the
    /// upper bound wins and NaN bounds are ignored.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

fn parse_f64(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::NotANumber { var, value: raw }),
        },
    }
}
