//! Overtime entry model.
//!
//! Overtime is priced once, when it is recorded. The effective rate and the
//! total are stored on the entry and are authoritative from then on, so a later
//! change to the employee's rate or the overtime multiplier never rewrites
//! payroll that has already been derived.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{EngineError, EngineResult};

use super::{Employee, lenient};

/// One block of overtime worked by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee who worked the overtime.
    pub employee_id: String,
    /// The day the overtime was worked; `None` if the stored date was unreadable.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Hours of overtime worked.
    pub hours: Decimal,
    /// Effective overtime rate per hour captured at creation.
    pub rate: Decimal,
    /// Amount owed for this entry (`hours × rate` at creation).
    pub total: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl OvertimeEntry {
    /// Records overtime, freezing the effective rate from the current settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` if `hours` is not positive, and `CalculationError`
    /// if the rate or total does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::Settings;
    /// use payroll_engine::models::{Employee, OvertimeEntry};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", "Can", Decimal::from(100), None);
    /// let entry = OvertimeEntry::record(
    ///     "ot_001",
    ///     &employee,
    ///     NaiveDate::from_ymd_opt(2025, 11, 7).unwrap(),
    ///     Decimal::from(2),
    ///     &Settings::default(),
    ///     "inventory count",
    /// )
    /// .unwrap();
    /// assert_eq!(entry.rate, Decimal::from(150));
    /// assert_eq!(entry.total, Decimal::from(300));
    /// ```
    pub fn record(
        id: impl Into<String>,
        employee: &Employee,
        date: NaiveDate,
        hours: Decimal,
        settings: &Settings,
        description: impl Into<String>,
    ) -> EngineResult<Self> {
        let id = id.into();
        if hours <= Decimal::ZERO {
            return Err(EngineError::InvalidEntry {
                entry_id: id,
                message: format!("overtime hours must be greater than 0, got {}", hours),
            });
        }

        let rate = employee
            .hourly_rate
            .checked_mul(settings.overtime_multiplier)
            .ok_or_else(|| EngineError::out_of_range("overtime rate"))?;
        let total = hours
            .checked_mul(rate)
            .ok_or_else(|| EngineError::out_of_range("overtime total"))?;
        Ok(Self {
            id,
            employee_id: employee.id.clone(),
            date: Some(date),
            hours,
            rate,
            total,
            description: description.into(),
        })
    }
}
