//! Employee model.
//!
//! This module defines the [`Employee`] record consumed by every payroll
//! calculation. Employees are owned by an external registry and are treated as
//! immutable for the duration of a payroll run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::lenient;

fn default_active() -> bool {
    true
}

/// Represents an employee whose pay is derived by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hourly rate in currency per hour; never negative.
    pub hourly_rate: Decimal,
    /// The date the employee started work.
    ///
    /// `None` when the registry holds no date or one that could not be parsed;
    /// such an employee accrues zero working days.
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: Option<NaiveDate>,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Employee {
    /// Creates an active employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     "emp_001",
    ///     "Ayşe Demir",
    ///     Decimal::new(100, 0),
    ///     NaiveDate::from_ymd_opt(2024, 3, 1),
    /// );
    /// assert!(employee.active);
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        hourly_rate: Decimal,
        start_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hourly_rate,
            start_date,
            active: true,
        }
    }

    /// Checks the fields the payroll calculator depends on.
    ///
    /// A missing start date is deliberately not an error here.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.hourly_rate < Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                field: "hourly_rate".to_string(),
                message: format!("must not be negative, got {}", self.hourly_rate),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee::new(
            "emp_001",
            "Mehmet Kaya",
            Decimal::new(12550, 2),
            NaiveDate::from_ymd_opt(2023, 6, 1),
        )
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "name": "Mehmet Kaya",
            "hourly_rate": "125.50",
            "start_date": "2023-06-01",
            "active": false
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.hourly_rate, Decimal::new(12550, 2));
        assert_eq!(employee.start_date, NaiveDate::from_ymd_opt(2023, 6, 1));
        assert!(!employee.active);
    }

    #[test]
    fn test_active_defaults_to_true() {
        let json = r#"{"id": "emp_002", "name": "Zeynep", "hourly_rate": "90", "start_date": "2024-01-15"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.active);
    }

    #[test]
    fn test_unparseable_start_date_is_none() {
        let json = r#"{"id": "emp_003", "name": "Ali", "hourly_rate": "90", "start_date": "15.01.2024"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.start_date, None);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn test_serialize_employee_round_trip() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();
        assert!(json.contains("\"start_date\":\"2023-06-01\""));

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut employee = create_test_employee();
        employee.hourly_rate = Decimal::new(-1, 0);
        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "hourly_rate"),
            _ => panic!("Expected InvalidEmployee error"),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut employee = create_test_employee();
        employee.name = "  ".to_string();
        match employee.validate() {
            Err(EngineError::InvalidEmployee { field, .. }) => assert_eq!(field, "name"),
            _ => panic!("Expected InvalidEmployee error"),
        }
    }
}
