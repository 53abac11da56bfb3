//! Application state for the Payroll Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, Settings};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the settings loaded at startup. Requests never mutate them; a request
/// that needs different settings sends its own override.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Resolves the settings for one request.
    ///
    /// An override is validated before use; otherwise the loaded settings are
    /// returned.
    pub fn settings_for(&self, requested: Option<Settings>) -> EngineResult<Settings> {
        match requested {
            Some(settings) => {
                settings.validate()?;
                Ok(settings)
            }
            None => Ok(self.config.settings().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_state() -> AppState {
        AppState::new(ConfigLoader::from_settings(Settings::default()).unwrap())
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_settings_default_to_loaded() {
        let state = create_state();
        assert_eq!(state.settings_for(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_settings_override_is_validated() {
        let state = create_state();

        let custom = Settings::new(Decimal::from(8), Decimal::from(2), false).unwrap();
        assert_eq!(state.settings_for(Some(custom.clone())).unwrap(), custom);

        let mut invalid = Settings::default();
        invalid.overtime_multiplier = Decimal::new(5, 1);
        assert!(state.settings_for(Some(invalid)).is_err());
    }
}
