//! Payroll period model.
//!
//! A payroll period is one calendar month, represented as the half-open date
//! range `[first day of month, first day of next month)`.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

#[derive(Deserialize)]
struct PeriodKey {
    year: i32,
    month: u32,
}

/// A calendar month used as the unit of payroll.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(2025, 12).unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "PeriodKey")]
pub struct PayrollPeriod {
    year: i32,
    month: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Creates the period for the given month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `month` is outside 1–12 or the year cannot be
    /// represented as a calendar date.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                message: format!("month {} is outside 1-12", month),
            });
        }

        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1), 1)
        } else {
            (Some(year), month + 1)
        };

        let start_date = NaiveDate::from_ymd_opt(year, month, 1);
        let end_date = next_year.and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1));

        match (start_date, end_date) {
            (Some(start_date), Some(end_date)) => Ok(Self {
                year,
                month,
                start_date,
                end_date,
            }),
            _ => Err(EngineError::InvalidPeriod {
                message: format!("year {} is out of range", year),
            }),
        }
    }

    /// Parses a period from free-text year and month fields.
    ///
    /// ```
    /// use payroll_engine::models::PayrollPeriod;
    ///
    /// assert!(PayrollPeriod::parse("2025", " 11 ").is_ok());
    /// assert!(PayrollPeriod::parse("twenty", "11").is_err());
    /// ```
    pub fn parse(year: &str, month: &str) -> EngineResult<Self> {
        let year: i32 = year.trim().parse().map_err(|_| EngineError::InvalidPeriod {
            message: format!("year '{}' is not a number", year.trim()),
        })?;
        let month: u32 = month.trim().parse().map_err(|_| EngineError::InvalidPeriod {
            message: format!("month '{}' is not a number", month.trim()),
        })?;
        Self::new(year, month)
    }

    /// Returns the twelve periods of a year in calendar order.
    pub fn months_of_year(year: i32) -> EngineResult<Vec<Self>> {
        (1..=12).map(|month| Self::new(year, month)).collect()
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month, 1–12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the period (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// First day of the following month (exclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Last calendar day of the period (inclusive).
    pub fn last_day(&self) -> NaiveDate {
        self.end_date - Duration::days(1)
    }

    /// Checks whether `date` falls inside the half-open range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date < self.end_date
    }
}

impl TryFrom<PeriodKey> for PayrollPeriod {
    type Error = EngineError;

    fn try_from(key: PeriodKey) -> Result<Self, Self::Error> {
        Self::new(key.year, key.month)
    }
}

impl std::fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
