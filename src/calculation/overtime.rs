//! Overtime aggregation.
//!
//! Sums the hours and amounts stored on overtime entries. The stored figures
//! were priced when the overtime was recorded and are never recomputed here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, OvertimeEntry};

/// Summed overtime for a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeTotals {
    /// Total overtime hours.
    pub hours: Decimal,
    /// Total overtime pay.
    pub amount: Decimal,
}

/// The result of aggregating overtime, with its audit step.
#[derive(Debug, Clone)]
pub struct OvertimeTotalsResult {
    /// The summed totals.
    pub totals: OvertimeTotals,
    /// The audit step recording the aggregation.
    pub audit_step: AuditStep,
}

/// Sums stored hours and totals over entries scoped to one employee and period.
///
/// # Errors
///
/// Returns `CalculationError` when either sum does not fit in a `Decimal`.
pub fn overtime_total(entries: &[OvertimeEntry]) -> EngineResult<OvertimeTotals> {
    entries
        .iter()
        .try_fold(OvertimeTotals::default(), |acc, entry| -> EngineResult<_> {
            Ok(OvertimeTotals {
                hours: acc
                    .hours
                    .checked_add(entry.hours)
                    .ok_or_else(|| EngineError::out_of_range("overtime hours"))?,
                amount: acc
                    .amount
                    .checked_add(entry.total)
                    .ok_or_else(|| EngineError::out_of_range("overtime pay"))?,
            })
        })
}

/// Sums overtime and records an audit step.
pub fn calculate_overtime_total(
    entries: &[OvertimeEntry],
    step_number: u32,
) -> EngineResult<OvertimeTotalsResult> {
    let totals = overtime_total(entries)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_total".to_string(),
        rule_name: "Overtime Total".to_string(),
        input: serde_json::json!({
            "entries": entries.iter().map(|e| serde_json::json!({
                "id": e.id,
                "hours": e.hours.normalize().to_string(),
                "rate": e.rate.normalize().to_string(),
                "total": e.total.normalize().to_string()
            })).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "overtime_hours": totals.hours.normalize().to_string(),
            "overtime_pay": totals.amount.normalize().to_string()
        }),
        reasoning: format!(
            "Summed stored figures of {} overtime entr{}: {} hour(s), {}",
            entries.len(),
            if entries.len() == 1 { "y" } else { "ies" },
            totals.hours.normalize(),
            totals.amount.normalize()
        ),
    };

    Ok(OvertimeTotalsResult { totals, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(id: &str, hours: &str, rate: &str, total: &str) -> OvertimeEntry {
        OvertimeEntry {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 11, 12),
            hours: dec(hours),
            rate: dec(rate),
            total: dec(total),
            description: String::new(),
        }
    }

    #[test]
    fn test_sums_stored_figures() {
        let entries = vec![entry("o1", "2", "150", "300"), entry("o2", "1.5", "120", "180")];
        let totals = overtime_total(&entries).unwrap();
        assert_eq!(totals.hours, dec("3.5"));
        assert_eq!(totals.amount, dec("480"));
    }

    #[test]
    fn test_stored_total_is_authoritative() {
        // Total deliberately differs from hours × rate.
        let entries = vec![entry("o1", "2", "150", "250")];
        assert_eq!(overtime_total(&entries).unwrap().amount, dec("250"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(overtime_total(&[]).unwrap(), OvertimeTotals::default());
    }

    #[test]
    fn test_audit_step() {
        let result = calculate_overtime_total(&[entry("o1", "5", "100", "500")], 6).unwrap();
        assert_eq!(result.audit_step.step_number, 6);
        assert_eq!(result.audit_step.output["overtime_pay"], "500");
        assert_eq!(result.audit_step.input["entries"][0]["id"], "o1");
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let max = Decimal::MAX.to_string();
        let entries = vec![entry("o1", "1", "1", &max), entry("o2", "1", "1", &max)];
        assert!(matches!(
            overtime_total(&entries),
            Err(EngineError::CalculationError { .. })
        ));
    }
}
