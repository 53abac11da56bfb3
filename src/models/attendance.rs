//! Attendance entry model and absence categories.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::lenient;

/// The kind of absence an attendance entry records.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceCategory;
///
/// let category: AttendanceCategory = "full_absence".parse().unwrap();
/// assert_eq!(category, AttendanceCategory::FullAbsence);
/// assert_eq!(category.code(), "FULL_ABSENCE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum AttendanceCategory {
    /// Partial day missed; the entry's own hours are deducted.
    HourLoss,
    /// Whole day absent without leave; one standard day is deducted.
    FullAbsence,
    /// Unpaid leave; one standard day is deducted.
    FreeLeave,
    /// Paid annual leave; nothing is deducted.
    AnnualLeave,
    /// Paid medical leave backed by a report; nothing is deducted.
    Report,
}

impl AttendanceCategory {
    /// All categories in display order.
    pub const ALL: [AttendanceCategory; 5] = [
        AttendanceCategory::HourLoss,
        AttendanceCategory::FullAbsence,
        AttendanceCategory::FreeLeave,
        AttendanceCategory::AnnualLeave,
        AttendanceCategory::Report,
    ];

    /// The stable code used in stored records.
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceCategory::HourLoss => "HOUR_LOSS",
            AttendanceCategory::FullAbsence => "FULL_ABSENCE",
            AttendanceCategory::FreeLeave => "FREE_LEAVE",
            AttendanceCategory::AnnualLeave => "ANNUAL_LEAVE",
            AttendanceCategory::Report => "REPORT",
        }
    }

    /// Returns true when the category costs a full standard day.
    pub fn deducts_full_day(&self) -> bool {
        matches!(
            self,
            AttendanceCategory::FullAbsence | AttendanceCategory::FreeLeave
        )
    }

    /// Returns true for paid leave that leaves pay untouched.
    pub fn is_paid_leave(&self) -> bool {
        matches!(
            self,
            AttendanceCategory::AnnualLeave | AttendanceCategory::Report
        )
    }
}

impl std::fmt::Display for AttendanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AttendanceCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::InvalidEntry {
                entry_id: String::new(),
                message: format!("unknown attendance category '{}'", wanted),
            })
    }
}

impl TryFrom<String> for AttendanceCategory {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One attendance record for an employee on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee this entry belongs to.
    pub employee_id: String,
    /// The day the absence occurred; `None` if the stored date was unreadable.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// The absence category; `None` if the stored code was not recognised.
    #[serde(default, deserialize_with = "lenient::category")]
    pub category: Option<AttendanceCategory>,
    /// Hours lost, meaningful only for [`AttendanceCategory::HourLoss`].
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub hours: Option<Decimal>,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
}

impl AttendanceEntry {
    /// Creates an entry, discarding `hours` for categories that ignore them.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        date: NaiveDate,
        category: AttendanceCategory,
        hours: Option<Decimal>,
        note: impl Into<String>,
    ) -> Self {
        let hours = match category {
            AttendanceCategory::HourLoss => hours,
            _ => None,
        };
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            date: Some(date),
            category: Some(category),
            hours,
            note: note.into(),
        }
    }
}
