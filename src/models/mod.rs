//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod advance;
mod attendance;
mod employee;
pub mod lenient;
mod overtime;
mod payroll_summary;
mod period;
mod snapshot;

pub use advance::{AdvanceEntry, BalanceUpdate, CURRENCY_DECIMAL_PLACES};
pub use attendance::{AttendanceCategory, AttendanceEntry};
pub use employee::Employee;
pub use overtime::OvertimeEntry;
pub use payroll_summary::{
    AdvanceDeductionPolicy, AnnualReport, AuditStep, AuditTrace, AuditWarning, PayrollSummary,
    PayrollTotals, PeriodPayroll,
};
pub use period::PayrollPeriod;
pub use snapshot::{EmployeeEntries, PayrollSnapshot};
