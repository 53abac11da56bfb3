//! Working-days calculation.
//!
//! Counts the days of a payroll period an employee could have worked. The
//! counting window starts at the later of the period start and the employee's
//! start date, and ends at the earlier of the period's last day and the as-of
//! date, so days that have not happened yet are never counted.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{AuditStep, AuditWarning, PayrollPeriod};

/// The result of counting working days, with its audit step.
#[derive(Debug, Clone)]
pub struct WorkingDaysResult {
    /// Number of countable days in the window.
    pub working_days: u32,
    /// The audit step recording the count.
    pub audit_step: AuditStep,
    /// Set when the employee's start date was missing or unreadable.
    pub warning: Option<AuditWarning>,
}

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The inclusive counting window, or `None` when it is empty.
fn counting_window(
    start_date: NaiveDate,
    period: &PayrollPeriod,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let first = start_date.max(period.start_date());
    let last = period.last_day().min(today);
    (first <= last).then_some((first, last))
}

/// Counts working days for an employee in a period.
///
/// An employee without a readable start date has no working days.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::count_working_days;
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(2025, 12).unwrap();
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1);
/// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
///
/// assert_eq!(count_working_days(start, &period, false, today), 23);
/// assert_eq!(count_working_days(start, &period, true, today), 31);
/// ```
pub fn count_working_days(
    start_date: Option<NaiveDate>,
    period: &PayrollPeriod,
    include_weekends: bool,
    today: NaiveDate,
) -> u32 {
    let Some(start_date) = start_date else {
        return 0;
    };
    let Some((first, last)) = counting_window(start_date, period, today) else {
        return 0;
    };

    let count = first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| include_weekends || is_weekday(*day))
        .count();
    // A month never holds more than 31 days.
    count as u32
}

/// Counts working days and records an audit step for the count.
pub fn calculate_working_days(
    start_date: Option<NaiveDate>,
    period: &PayrollPeriod,
    include_weekends: bool,
    today: NaiveDate,
    step_number: u32,
) -> WorkingDaysResult {
    let working_days = count_working_days(start_date, period, include_weekends, today);
    let window = start_date.and_then(|d| counting_window(d, period, today));

    let warning = start_date.is_none().then(|| {
        AuditWarning::new(
            "MISSING_START_DATE",
            "Employee start date is missing or unreadable; no working days counted",
            "high",
        )
    });

    let reasoning = match (start_date, window) {
        (None, _) => "No readable start date; working days set to 0".to_string(),
        (Some(_), None) => format!(
            "Counting window for {} is empty (employee not yet started or period not yet begun)",
            period
        ),
        (Some(_), Some((first, last))) => format!(
            "Counted {} day(s) from {} to {} ({})",
            working_days,
            first,
            last,
            if include_weekends {
                "weekends included"
            } else {
                "weekdays only"
            }
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "working_days".to_string(),
        rule_name: "Working Days Count".to_string(),
        input: serde_json::json!({
            "period": period.to_string(),
            "employee_start_date": start_date.map(|d| d.to_string()),
            "include_weekends": include_weekends,
            "as_of": today.to_string()
        }),
        output: serde_json::json!({
            "window_start": window.map(|(first, _)| first.to_string()),
            "window_end": window.map(|(_, last)| last.to_string()),
            "working_days": working_days
        }),
        reasoning,
    };

    WorkingDaysResult {
        working_days,
        audit_step,
        warning,
    }
}
