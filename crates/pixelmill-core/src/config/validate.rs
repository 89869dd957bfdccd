//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::{Config, PresetCurve};

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        check_curve("presets.oceanic", &self.presets.oceanic)?;
        check_curve("presets.islands", &self.presets.islands)?;
        check_curve("presets.marine", &self.presets.marine)?;
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        Ok(())
    }
}

fn check_curve(name: &str, curve: &PresetCurve) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&curve.strength) {
        return Err(ConfigError::ValidationError(format!(
            "{}.strength must be between 0.0 and 1.0",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_strength() {
        let mut config = Config::default();
        config.presets.islands.strength = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("islands.strength"));

        config.presets.islands.strength = -0.1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("islands.strength"));
    }

    #[test]
    fn test_validate_rejects_nan_strength() {
        let mut config = Config::default();
        config.presets.marine.strength = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_max_dimension() {
        let mut config = Config::default();
        config.limits.max_image_dimension = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_image_dimension"));
    }

    #[test]
    fn test_validate_rejects_zero_max_file_size() {
        let mut config = Config::default();
        config.limits.max_file_size_mb = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size_mb"));
    }
}
