//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! settings from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::Settings;

/// Name of the settings file inside a configuration directory.
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── settings.yaml   # daily hours, overtime multiplier, weekend policy
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Overtime multiplier: {}", loader.settings().overtime_multiplier);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `settings.yaml` is missing
    /// - the file contains invalid YAML or is missing a field
    /// - a value violates the settings invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let settings_path = path.as_ref().join(SETTINGS_FILE_NAME);
        let path_str = settings_path.display().to_string();

        let content =
            fs::read_to_string(&settings_path).map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, settings = ?loader.settings, "Loaded payroll settings");
        Ok(loader)
    }

    /// Builds a loader from YAML text that was obtained some other way.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Wraps already-constructed settings after validating them.
    pub fn from_settings(settings: Settings) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        let settings: Settings =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().daily_standard_hours, dec("10"));
        assert_eq!(loader.settings().overtime_multiplier, dec("1.5"));
        assert!(loader.settings().include_weekends);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains(SETTINGS_FILE_NAME));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_yaml_str_parses_numbers_and_strings() {
        let yaml = "daily_standard_hours: 8\novertime_multiplier: \"1.25\"\ninclude_weekends: false\n";
        let loader = ConfigLoader::from_yaml_str(yaml).unwrap();
        assert_eq!(loader.settings().daily_standard_hours, dec("8"));
        assert_eq!(loader.settings().overtime_multiplier, dec("1.25"));
        assert!(!loader.settings().include_weekends);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let yaml = "daily_standard_hours: 8\ninclude_weekends: false\n";
        match ConfigLoader::from_yaml_str(yaml) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert_eq!(path, "<inline>");
                assert!(message.contains("overtime_multiplier"));
            }
            _ => panic!("Expected ConfigParseError"),
        }
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let yaml = "daily_standard_hours: 0\novertime_multiplier: 1.5\ninclude_weekends: true\n";
        assert!(matches!(
            ConfigLoader::from_yaml_str(yaml),
            Err(EngineError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn test_from_settings_validates() {
        let mut settings = Settings::default();
        settings.overtime_multiplier = dec("0.5");
        assert!(ConfigLoader::from_settings(settings).is_err());
        assert!(ConfigLoader::from_settings(Settings::default()).is_ok());
    }
}
