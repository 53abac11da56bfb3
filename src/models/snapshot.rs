//! Point-in-time snapshot of payroll source records.
//!
//! A payroll run loads every relevant record up front, computes purely over
//! that snapshot, and only then hands one batch of balance updates back to the
//! caller. This module owns the per-employee, per-period slicing of the
//! snapshot; the calculators themselves never filter.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::{
    AdvanceEntry, AttendanceEntry, AuditWarning, Employee, OvertimeEntry, PayrollPeriod,
};

/// All source records a payroll run reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSnapshot {
    /// Employees in the registry.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Attendance entries for any employee and date.
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
    /// Overtime entries for any employee and date.
    #[serde(default)]
    pub overtime: Vec<OvertimeEntry>,
    /// Cash advances for any employee and date.
    #[serde(default)]
    pub advances: Vec<AdvanceEntry>,
}

/// The records of one employee relevant to one period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeEntries {
    /// Attendance entries dated within the period.
    pub attendance: Vec<AttendanceEntry>,
    /// Overtime entries dated within the period.
    pub overtime: Vec<OvertimeEntry>,
    /// Advances granted within the period.
    pub advances_granted: Vec<AdvanceEntry>,
    /// Advances granted on or before the period's last day that are still open.
    pub open_advances: Vec<AdvanceEntry>,
    /// Records left out because their date or category could not be read.
    pub warnings: Vec<AuditWarning>,
}

fn undated_warning(kind: &str, id: &str) -> AuditWarning {
    warn!(record_kind = kind, record_id = id, "Skipping record with unreadable date");
    AuditWarning::new(
        "UNREADABLE_DATE",
        format!("{} '{}' has no readable date and was skipped", kind, id),
        "medium",
    )
}

fn uncategorized_warning(id: &str) -> AuditWarning {
    warn!(record_id = id, "Skipping attendance entry with unknown category");
    AuditWarning::new(
        "UNREADABLE_CATEGORY",
        format!("attendance '{}' has no recognised category and was skipped", id),
        "medium",
    )
}

impl PayrollSnapshot {
    /// Looks up an employee by ID.
    pub fn employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Slices the snapshot down to one employee and one period.
    pub fn entries_for(&self, employee_id: &str, period: &PayrollPeriod) -> EmployeeEntries {
        let mut entries = EmployeeEntries::default();

        for entry in self.attendance.iter().filter(|e| e.employee_id == employee_id) {
            match (entry.date, entry.category) {
                (Some(date), Some(_)) if period.contains(date) => {
                    entries.attendance.push(entry.clone())
                }
                (Some(date), None) if period.contains(date) => {
                    entries.warnings.push(uncategorized_warning(&entry.id))
                }
                (Some(_), _) => {}
                (None, _) => entries.warnings.push(undated_warning("attendance", &entry.id)),
            }
        }

        for entry in self.overtime.iter().filter(|e| e.employee_id == employee_id) {
            match entry.date {
                Some(date) if period.contains(date) => entries.overtime.push(entry.clone()),
                Some(_) => {}
                None => entries.warnings.push(undated_warning("overtime", &entry.id)),
            }
        }

        for advance in self.advances.iter().filter(|a| a.employee_id == employee_id) {
            match advance.date {
                Some(date) => {
                    if period.contains(date) {
                        entries.advances_granted.push(advance.clone());
                    }
                    if date < period.end_date() && advance.is_open() {
                        entries.open_advances.push(advance.clone());
                    }
                }
                None => entries.warnings.push(undated_warning("advance", &advance.id)),
            }
        }

        entries
    }
}
