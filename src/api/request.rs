//! Request types for the Payroll Engine API.
//!
//! Every request may carry an `as_of` date and a `settings` override. When
//! omitted, the server's current date and the loaded settings apply.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayrollOptions;
use crate::config::Settings;
use crate::models::{AdvanceDeductionPolicy, AdvanceEntry, Employee, PayrollSnapshot};

fn default_true() -> bool {
    true
}

fn default_periods_elapsed() -> u32 {
    1
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Calendar year of the period.
    pub year: i32,
    /// Calendar month of the period, 1 to 12.
    pub month: u32,
    /// Date that clamps working days; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Settings to use instead of the loaded ones.
    #[serde(default)]
    pub settings: Option<Settings>,
    /// Rule for the advance deduction.
    #[serde(default)]
    pub advance_policy: AdvanceDeductionPolicy,
    /// Whether inactive employees are included.
    #[serde(default = "default_true")]
    pub include_inactive: bool,
    /// Whether employees with no hours, overtime or deduction are left out.
    #[serde(default)]
    pub skip_idle_employees: bool,
    /// The records to compute over.
    #[serde(default)]
    pub snapshot: PayrollSnapshot,
}

impl PayrollRequest {
    /// The batch options this request asks for.
    pub fn options(&self) -> PayrollOptions {
        PayrollOptions {
            advance_policy: self.advance_policy,
            include_inactive: self.include_inactive,
            skip_idle_employees: self.skip_idle_employees,
        }
    }
}

/// Request body for the `/payroll/annual` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualReportRequest {
    /// The employee to report on.
    pub employee_id: String,
    /// Calendar year to report.
    pub year: i32,
    /// Date after which months are not reported; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Settings to use instead of the loaded ones.
    #[serde(default)]
    pub settings: Option<Settings>,
    /// Rule for the advance deduction.
    #[serde(default)]
    pub advance_policy: AdvanceDeductionPolicy,
    /// The records to compute over.
    #[serde(default)]
    pub snapshot: PayrollSnapshot,
}

impl AnnualReportRequest {
    /// The options this request asks for.
    pub fn options(&self) -> PayrollOptions {
        PayrollOptions {
            advance_policy: self.advance_policy,
            ..PayrollOptions::default()
        }
    }
}

/// Request body for the `/advances/amortize` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizeRequest {
    /// Open advances to amortize.
    pub advances: Vec<AdvanceEntry>,
    /// Number of periods to amortize over.
    #[serde(default = "default_periods_elapsed")]
    pub periods_elapsed: u32,
}

/// Request body for the `/overtime/record` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOvertimeRequest {
    /// Identifier for the new entry.
    pub id: String,
    /// The employee who worked the overtime.
    pub employee: Employee,
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// Hours worked.
    pub hours: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Settings to use instead of the loaded ones.
    #[serde(default)]
    pub settings: Option<Settings>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceCategory;

    #[test]
    fn test_deserialize_payroll_request_defaults() {
        let json = r#"{ "year": 2025, "month": 11 }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.year, 2025);
        assert_eq!(request.month, 11);
        assert!(request.as_of.is_none());
        assert!(request.settings.is_none());
        assert_eq!(request.advance_policy, AdvanceDeductionPolicy::GrantedInPeriod);
        assert!(request.include_inactive);
        assert!(!request.skip_idle_employees);
        assert!(request.snapshot.employees.is_empty());
    }

    #[test]
    fn test_deserialize_payroll_request_with_snapshot() {
        let json = r#"{
            "year": 2025,
            "month": 11,
            "as_of": "2025-11-20",
            "advance_policy": "amortized",
            "include_inactive": false,
            "skip_idle_employees": true,
            "settings": {
                "daily_standard_hours": "8",
                "overtime_multiplier": "2",
                "include_weekends": false
            },
            "snapshot": {
                "employees": [
                    { "id": "emp_001", "name": "Selin", "hourly_rate": "90", "start_date": "2023-02-01" }
                ],
                "attendance": [
                    { "id": "a1", "employee_id": "emp_001", "date": "2025-11-03", "category": "hour_loss", "hours": "2,5" }
                ]
            }
        }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.as_of, NaiveDate::from_ymd_opt(2025, 11, 20));
        assert_eq!(request.options().advance_policy, AdvanceDeductionPolicy::Amortized);
        assert!(!request.options().include_inactive);
        assert!(request.options().skip_idle_employees);
        assert_eq!(request.settings.unwrap().daily_standard_hours, Decimal::from(8));
        assert_eq!(request.snapshot.employees[0].name, "Selin");
        assert_eq!(request.snapshot.attendance[0].hours, Some(Decimal::new(25, 1)));
        assert_eq!(
            request.snapshot.attendance[0].category,
            Some(AttendanceCategory::HourLoss)
        );
    }

    #[test]
    fn test_deserialize_amortize_request_default_periods() {
        let json = r#"{
            "advances": [
                { "id": "adv_1", "employee_id": "emp_001", "date": "2025-10-01",
                  "amount": "900", "installments": 3, "remaining": "900" }
            ]
        }"#;
        let request: AmortizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.periods_elapsed, 1);
        assert_eq!(request.advances[0].installments, 3);
    }

    #[test]
    fn test_deserialize_record_overtime_request() {
        let json = r#"{
            "id": "ot_1",
            "employee": { "id": "emp_001", "name": "Selin", "hourly_rate": "90" },
            "date": "2025-11-07",
            "hours": "2"
        }"#;
        let request: RecordOvertimeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee.start_date, None);
        assert!(request.employee.active);
        assert_eq!(request.description, "");
    }
}
