//! Attendance aggregation.
//!
//! Converts a period's attendance entries into the hours they cost. Full-day
//! absences cost one standard day, hour losses cost their own hours, and paid
//! leave costs nothing. The caller subtracts the sum from theoretical hours.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceCategory, AttendanceEntry, AuditStep};

/// The result of aggregating attendance, with its audit step.
#[derive(Debug, Clone)]
pub struct LostHoursResult {
    /// Total hours lost across all entries.
    pub lost_hours: Decimal,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// Hours a single entry costs.
///
/// Missing or negative hour-loss values count as zero, as does an entry whose
/// category could not be read.
pub fn entry_lost_hours(entry: &AttendanceEntry, daily_standard_hours: Decimal) -> Decimal {
    match entry.category {
        Some(category) if category.deducts_full_day() => daily_standard_hours,
        Some(category) if category.is_paid_leave() => Decimal::ZERO,
        Some(_) => entry.hours.unwrap_or(Decimal::ZERO).max(Decimal::ZERO),
        None => Decimal::ZERO,
    }
}

fn sum_lost_hours<'a>(
    entries: impl IntoIterator<Item = &'a AttendanceEntry>,
    daily_standard_hours: Decimal,
) -> EngineResult<Decimal> {
    entries.into_iter().try_fold(Decimal::ZERO, |total, entry| {
        total
            .checked_add(entry_lost_hours(entry, daily_standard_hours))
            .ok_or_else(|| EngineError::out_of_range("missing hours"))
    })
}

/// Sums the hours lost over entries already scoped to one employee and period.
///
/// # Errors
///
/// Returns `CalculationError` when the sum does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::lost_hours;
/// use payroll_engine::models::{AttendanceCategory, AttendanceEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
/// let entries = vec![
///     AttendanceEntry::new("a1", "emp", day, AttendanceCategory::FullAbsence, None, ""),
///     AttendanceEntry::new("a2", "emp", day, AttendanceCategory::HourLoss, Some(Decimal::from(3)), ""),
/// ];
/// assert_eq!(lost_hours(&entries, Decimal::from(10)).unwrap(), Decimal::from(13));
/// ```
pub fn lost_hours(
    entries: &[AttendanceEntry],
    daily_standard_hours: Decimal,
) -> EngineResult<Decimal> {
    sum_lost_hours(entries, daily_standard_hours)
}

/// Sums lost hours and records an audit step with a per-category breakdown.
pub fn calculate_lost_hours(
    entries: &[AttendanceEntry],
    daily_standard_hours: Decimal,
    step_number: u32,
) -> EngineResult<LostHoursResult> {
    let mut breakdown = serde_json::Map::new();
    for category in AttendanceCategory::ALL {
        let matching: Vec<&AttendanceEntry> = entries
            .iter()
            .filter(|e| e.category == Some(category))
            .collect();
        if matching.is_empty() {
            continue;
        }
        let hours = sum_lost_hours(matching.iter().copied(), daily_standard_hours)?;
        breakdown.insert(
            category.code().to_string(),
            serde_json::json!({
                "entries": matching.len(),
                "hours": hours.normalize().to_string()
            }),
        );
    }

    let total = lost_hours(entries, daily_standard_hours)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "lost_hours".to_string(),
        rule_name: "Attendance Lost Hours".to_string(),
        input: serde_json::json!({
            "entry_count": entries.len(),
            "daily_standard_hours": daily_standard_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "by_category": breakdown,
            "missing_hours": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} attendance entr{} cost {} hour(s)",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            total.normalize()
        ),
    };

    Ok(LostHoursResult {
        lost_hours: total,
        audit_step,
    })
}
