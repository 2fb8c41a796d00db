//! Sampling parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// Parameters for one field generation run.
///
/// Missing keys in a settings file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Samples per axis; the grid has `resolution³` cells.
    pub resolution: u32,
    /// Side length of the sampled cube, centred on the origin.
    pub bounds_size: f32,
    /// Rays cast from every sample point.
    pub direction_count: u32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            resolution: 32,
            bounds_size: 2.0,
            direction_count: 10,
        }
    }
}

impl FieldSettings {
    /// Create settings from the three sampling parameters.
    pub fn new(resolution: u32, bounds_size: f32, direction_count: u32) -> Self {
        Self {
            resolution,
            bounds_size,
            direction_count,
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(FieldError::InvalidSettings(
                "resolution must be at least 1".into(),
            ));
        }
        if (self.resolution as usize).checked_pow(3).is_none() {
            return Err(FieldError::InvalidSettings(format!(
                "resolution {} is too large",
                self.resolution
            )));
        }
        if !self.bounds_size.is_finite() || self.bounds_size <= 0.0 {
            return Err(FieldError::InvalidSettings(
                "bounds_size must be positive and finite".into(),
            ));
        }
        if self.direction_count == 0 {
            return Err(FieldError::InvalidSettings(
                "direction_count must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of sample points, `resolution³`.
    pub fn sample_count(&self) -> usize {
        let r = self.resolution as usize;
        r * r * r
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        FieldSettings::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(FieldSettings::new(0, 1.0, 8).validate().is_err());
        assert!(FieldSettings::new(8, 0.0, 8).validate().is_err());
        assert!(FieldSettings::new(8, -2.0, 8).validate().is_err());
        assert!(FieldSettings::new(8, f32::NAN, 8).validate().is_err());
        assert!(FieldSettings::new(8, 1.0, 0).validate().is_err());
    }

    #[test]
    fn test_from_toml_partial() {
        let settings = FieldSettings::from_toml_str("resolution = 48\nbounds_size = 3.5\n").unwrap();
        assert_eq!(settings.resolution, 48);
        assert_eq!(settings.bounds_size, 3.5);
        assert_eq!(settings.direction_count, 10);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = FieldSettings::from_toml_str("direction_count = 0").unwrap_err();
        assert!(matches!(err, FieldError::InvalidSettings(_)));
        let err = FieldSettings::from_toml_str("resolution = \"many\"").unwrap_err();
        assert!(matches!(err, FieldError::SettingsParse(_)));
    }

    #[test]
    fn test_sample_count() {
        assert_eq!(FieldSettings::new(4, 1.0, 1).sample_count(), 64);
    }
}
