//! Configuration types for payroll derivation.
//!
//! This module contains the strongly-typed [`Settings`] structure that is
//! deserialized from YAML configuration files or supplied per request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Global payroll policy knobs.
///
/// Settings are read-only input to every calculation. Overtime entries capture
/// the multiplier at creation time, so changing these values never alters
/// payroll already derived from stored overtime amounts.
///
/// # Example
///
/// ```
/// use payroll_engine::config::Settings;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::new(Decimal::new(8, 0), Decimal::new(15, 1), false).unwrap();
/// assert!(!settings.include_weekends);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Standard working hours in one day; greater than zero and at most 24.
    pub daily_standard_hours: Decimal,
    /// Multiplier applied to the hourly rate for overtime; at least 1.0.
    pub overtime_multiplier: Decimal,
    /// Whether Saturdays and Sundays count as working days.
    pub include_weekends: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_standard_hours: Decimal::TEN,
            overtime_multiplier: Decimal::new(15, 1),
            include_weekends: true,
        }
    }
}

impl Settings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSettings` if `daily_standard_hours` is not in `(0, 24]`
    /// or `overtime_multiplier` is below 1.0.
    pub fn new(
        daily_standard_hours: Decimal,
        overtime_multiplier: Decimal,
        include_weekends: bool,
    ) -> EngineResult<Self> {
        let settings = Self {
            daily_standard_hours,
            overtime_multiplier,
            include_weekends,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the settings invariants.
    pub fn validate(&self) -> EngineResult<()> {
        if self.daily_standard_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidSettings {
                field: "daily_standard_hours".to_string(),
                message: format!("must be greater than 0, got {}", self.daily_standard_hours),
            });
        }
        if self.daily_standard_hours > HOURS_PER_DAY {
            return Err(EngineError::InvalidSettings {
                field: "daily_standard_hours".to_string(),
                message: format!("must be at most 24, got {}", self.daily_standard_hours),
            });
        }
        if self.overtime_multiplier < Decimal::ONE {
            return Err(EngineError::InvalidSettings {
                field: "overtime_multiplier".to_string(),
                message: format!("must be at least 1.0, got {}", self.overtime_multiplier),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.daily_standard_hours, dec("10"));
        assert_eq!(settings.overtime_multiplier, dec("1.5"));
        assert!(settings.include_weekends);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_daily_hours_rejected() {
        let result = Settings::new(Decimal::ZERO, dec("1.5"), true);
        match result {
            Err(EngineError::InvalidSettings { field, .. }) => {
                assert_eq!(field, "daily_standard_hours");
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_daily_hours_above_a_day_rejected() {
        assert!(Settings::new(dec("24"), dec("1.5"), true).is_ok());
        let result = Settings::new(Decimal::MAX, Decimal::ONE, true);
        match result {
            Err(EngineError::InvalidSettings { field, message }) => {
                assert_eq!(field, "daily_standard_hours");
                assert!(message.contains("at most 24"));
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_multiplier_below_one_rejected() {
        let result = Settings::new(dec("8"), dec("0.99"), true);
        match result {
            Err(EngineError::InvalidSettings { field, .. }) => {
                assert_eq!(field, "overtime_multiplier");
            }
            _ => panic!("Expected InvalidSettings error"),
        }
    }

    #[test]
    fn test_multiplier_of_exactly_one_accepted() {
        assert!(Settings::new(dec("7.5"), Decimal::ONE, false).is_ok());
    }

    #[test]
    fn test_deserialize_settings_from_json() {
        let json = r#"{
            "daily_standard_hours": "9.5",
            "overtime_multiplier": "2",
            "include_weekends": false
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.daily_standard_hours, dec("9.5"));
        assert_eq!(settings.overtime_multiplier, dec("2"));
        assert!(!settings.include_weekends);
    }
}
