//! Calculation logic for the Payroll Engine.
//!
//! This module contains the calculators that derive payroll: working-days
//! counting, attendance lost hours, overtime totals, advance amortization, and
//! the payroll summary that combines them for single employees, whole periods,
//! and annual reports.

mod amortization;
mod attendance;
mod overtime;
mod payroll;
mod working_days;

pub use amortization::{
    AmortizationResult, AmortizedDeductionResult, amortize, apply_balance_updates,
    calculate_amortized_deduction,
};
pub use attendance::{LostHoursResult, calculate_lost_hours, entry_lost_hours, lost_hours};
pub use overtime::{OvertimeTotals, OvertimeTotalsResult, calculate_overtime_total, overtime_total};
pub use payroll::{
    PayrollOptions, compute_annual_report, compute_period_payroll, compute_summary,
    compute_summary_amortized,
};
pub use working_days::{WorkingDaysResult, calculate_working_days, count_working_days, is_weekday};
