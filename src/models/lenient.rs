//! Fail-soft deserializers for fields that arrive from hand-entered records.
//!
//! A single malformed row must not abort a payroll run, so dates, hour values
//! and attendance codes that cannot be parsed become `None` instead of a
//! deserialization error. Callers then treat `None` as a neutral contribution.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::AttendanceCategory;

/// Date format used by every record.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Parses an ISO date, mapping anything unparseable to `None`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parses a decimal that may use a comma as the decimal separator.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let normalized = value.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Deserializes an optional date leniently.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Text(s)) => parse_date(&s),
        _ => None,
    })
}

/// Deserializes an optional decimal leniently.
pub fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Text(s)) => parse_decimal(&s),
        Some(RawScalar::Integer(i)) => Some(Decimal::from(i)),
        Some(RawScalar::Float(f)) => Decimal::try_from(f).ok(),
        Some(RawScalar::Flag(_)) | None => None,
    })
}

/// Deserializes an optional attendance category leniently.
///
/// Codes match case-insensitively; unknown codes become `None`.
pub fn category<'de, D>(deserializer: D) -> Result<Option<AttendanceCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Text(s)) => s.parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "date")]
        date: Option<NaiveDate>,
        #[serde(default, deserialize_with = "decimal")]
        hours: Option<Decimal>,
        #[serde(default, deserialize_with = "category")]
        category: Option<AttendanceCategory>,
    }

    #[test]
    fn test_valid_values_parse() {
        let holder: Holder =
            serde_json::from_str(r#"{"date": "2025-11-03", "hours": "2.5"}"#).unwrap();
        assert_eq!(holder.date, NaiveDate::from_ymd_opt(2025, 11, 3));
        assert_eq!(holder.hours, Some(Decimal::new(25, 1)));
    }

    #[test]
    fn test_garbage_becomes_none() {
        let holder: Holder =
            serde_json::from_str(r#"{"date": "03/11/2025", "hours": "two"}"#).unwrap();
        assert_eq!(holder.date, None);
        assert_eq!(holder.hours, None);
    }

    #[test]
    fn test_missing_and_null_become_none() {
        let holder: Holder = serde_json::from_str(r#"{"date": null}"#).unwrap();
        assert_eq!(holder.date, None);
        assert_eq!(holder.hours, None);
    }

    #[test]
    fn test_numeric_hours_and_comma_separator() {
        let holder: Holder = serde_json::from_str(r#"{"hours": 3}"#).unwrap();
        assert_eq!(holder.hours, Some(Decimal::from(3)));

        assert_eq!(parse_decimal("1,5"), Some(Decimal::new(15, 1)));
        assert_eq!(parse_decimal("   "), None);
    }

    #[test]
    fn test_category_codes() {
        let holder: Holder = serde_json::from_str(r#"{"category": "annual_leave"}"#).unwrap();
        assert_eq!(holder.category, Some(AttendanceCategory::AnnualLeave));

        let holder: Holder = serde_json::from_str(r#"{"category": "VACATION"}"#).unwrap();
        assert_eq!(holder.category, None);

        let holder: Holder = serde_json::from_str(r#"{"category": 3}"#).unwrap();
        assert_eq!(holder.category, None);
    }
}
