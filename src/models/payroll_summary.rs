//! Payroll result models.
//!
//! This module contains the [`PayrollSummary`] produced for one employee and
//! one period, the cross-employee [`PayrollTotals`], the batch and annual
//! containers, and the audit structures every calculation step records into.
//!
//! Summaries carry no timestamps or random identifiers: deriving payroll twice
//! from the same snapshot yields identical values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{BalanceUpdate, PayrollPeriod};

/// Which rule determines the advance deduction on a payroll summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceDeductionPolicy {
    /// Deduct the full principal of every advance granted within the period.
    #[default]
    GrantedInPeriod,
    /// Deduct one amortized installment from every open advance.
    Amortized,
}

impl std::fmt::Display for AdvanceDeductionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvanceDeductionPolicy::GrantedInPeriod => write!(f, "granted_in_period"),
            AdvanceDeductionPolicy::Amortized => write!(f, "amortized"),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings record records that were skipped or defaulted so the run could
/// continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for one payroll summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// Derived pay figures for one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The employee the summary is for.
    pub employee_id: String,
    /// The employee's display name at the time of the run.
    pub employee_name: String,
    /// The period the summary covers.
    pub period: PayrollPeriod,
    /// Countable working days in the period.
    pub working_days: u32,
    /// `working_days × daily_standard_hours`.
    pub theoretical_hours: Decimal,
    /// Hours lost to absences.
    pub missing_hours: Decimal,
    /// `max(theoretical_hours − missing_hours, 0)`.
    pub net_hours: Decimal,
    /// `net_hours × hourly_rate`.
    pub base_pay: Decimal,
    /// Overtime hours recorded in the period.
    pub overtime_hours: Decimal,
    /// Stored overtime amounts recorded in the period.
    pub overtime_pay: Decimal,
    /// Advance deduction according to `advance_policy`.
    pub advance_deduction: Decimal,
    /// `base_pay + overtime_pay − advance_deduction`.
    pub net_pay: Decimal,
    /// The rule used for `advance_deduction`.
    pub advance_policy: AdvanceDeductionPolicy,
    /// Every step and warning of the derivation.
    pub audit_trace: AuditTrace,
}

impl PayrollSummary {
    /// Returns true when the employee had neither scheduled nor missed hours.
    pub fn is_idle(&self) -> bool {
        self.theoretical_hours.is_zero() && self.missing_hours.is_zero()
    }

    /// Returns true when the period holds nothing worth reporting.
    pub fn is_empty(&self) -> bool {
        self.is_idle() && self.overtime_pay.is_zero() && self.advance_deduction.is_zero()
    }
}

/// Component-wise sum of payroll summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of summaries summed.
    pub employee_count: u32,
    /// Sum of working days.
    pub working_days: u32,
    /// Sum of theoretical hours.
    pub theoretical_hours: Decimal,
    /// Sum of missing hours.
    pub missing_hours: Decimal,
    /// Sum of net hours.
    pub net_hours: Decimal,
    /// Sum of base pay.
    pub base_pay: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of overtime pay.
    pub overtime_pay: Decimal,
    /// Sum of advance deductions.
    pub advance_deduction: Decimal,
    /// Sum of net pay; the cash the run pays out.
    pub net_pay: Decimal,
}

impl PayrollTotals {
    /// Adds one summary into the running totals.
    ///
    /// # Errors
    ///
    /// Returns `CalculationError` when a sum does not fit in a `Decimal`; the
    /// totals are left unchanged.
    pub fn add(&mut self, summary: &PayrollSummary) -> EngineResult<()> {
        fn sum(total: Decimal, value: Decimal, figure: &str) -> EngineResult<Decimal> {
            total
                .checked_add(value)
                .ok_or_else(|| EngineError::out_of_range(figure))
        }

        *self = Self {
            employee_count: self.employee_count + 1,
            working_days: self.working_days + summary.working_days,
            theoretical_hours: sum(
                self.theoretical_hours,
                summary.theoretical_hours,
                "total theoretical hours",
            )?,
            missing_hours: sum(self.missing_hours, summary.missing_hours, "total missing hours")?,
            net_hours: sum(self.net_hours, summary.net_hours, "total net hours")?,
            base_pay: sum(self.base_pay, summary.base_pay, "total base pay")?,
            overtime_hours: sum(
                self.overtime_hours,
                summary.overtime_hours,
                "total overtime hours",
            )?,
            overtime_pay: sum(self.overtime_pay, summary.overtime_pay, "total overtime pay")?,
            advance_deduction: sum(
                self.advance_deduction,
                summary.advance_deduction,
                "total advance deduction",
            )?,
            net_pay: sum(self.net_pay, summary.net_pay, "total net pay")?,
        };
        Ok(())
    }

    /// Sums a sequence of summaries.
    pub fn from_summaries<'a, I>(summaries: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = &'a PayrollSummary>,
    {
        summaries.into_iter().try_fold(Self::default(), |mut totals, s| -> EngineResult<Self> {
            totals.add(s)?;
            Ok(totals)
        })
    }
}

/// The payroll of every employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPayroll {
    /// The period processed.
    pub period: PayrollPeriod,
    /// The deduction rule used for every summary.
    pub advance_policy: AdvanceDeductionPolicy,
    /// One summary per employee, ordered by name.
    pub summaries: Vec<PayrollSummary>,
    /// Sum of all summaries.
    pub totals: PayrollTotals,
    /// Advance balances to persist; empty unless amortization was applied.
    pub balance_updates: Vec<BalanceUpdate>,
    /// Employees left out of the run because their record was invalid.
    pub warnings: Vec<AuditWarning>,
}

/// Month-by-month payroll of one employee across a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualReport {
    /// The employee the report is for.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The calendar year covered.
    pub year: i32,
    /// Summaries for months with activity, in calendar order.
    pub months: Vec<PayrollSummary>,
    /// Sum of the monthly summaries.
    pub totals: PayrollTotals,
    /// Advance balances after the last reported month; empty unless amortized.
    pub balance_updates: Vec<BalanceUpdate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_summary(net_hours: &str, net_pay: &str) -> PayrollSummary {
        PayrollSummary {
            employee_id: "emp_001".to_string(),
            employee_name: "Deniz".to_string(),
            period: PayrollPeriod::new(2025, 11).unwrap(),
            working_days: 20,
            theoretical_hours: dec("200"),
            missing_hours: dec("20"),
            net_hours: dec(net_hours),
            base_pay: dec("18000"),
            overtime_hours: dec("5"),
            overtime_pay: dec("500"),
            advance_deduction: dec("1000"),
            net_pay: dec(net_pay),
            advance_policy: AdvanceDeductionPolicy::GrantedInPeriod,
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_totals_are_component_wise_sums() {
        let summaries = vec![create_summary("180", "17500"), create_summary("170", "16500")];
        let totals = PayrollTotals::from_summaries(&summaries).unwrap();

        assert_eq!(totals.employee_count, 2);
        assert_eq!(totals.working_days, 40);
        assert_eq!(totals.theoretical_hours, dec("400"));
        assert_eq!(totals.net_hours, dec("350"));
        assert_eq!(totals.overtime_pay, dec("1000"));
        assert_eq!(totals.advance_deduction, dec("2000"));
        assert_eq!(totals.net_pay, dec("34000"));
    }

    #[test]
    fn test_totals_of_nothing_are_zero() {
        let totals = PayrollTotals::from_summaries(Vec::<PayrollSummary>::new().iter()).unwrap();
        assert_eq!(totals, PayrollTotals::default());
    }

    #[test]
    fn test_overflowing_add_leaves_totals_unchanged() {
        let mut totals = PayrollTotals::from_summaries([&create_summary("180", "17500")]).unwrap();
        let before = totals.clone();
        let mut huge = create_summary("180", "17500");
        huge.net_pay = Decimal::MAX;

        assert!(matches!(
            totals.add(&huge),
            Err(EngineError::CalculationError { .. })
        ));
        assert_eq!(totals, before);
    }

    #[test]
    fn test_is_empty() {
        let mut summary = create_summary("0", "0");
        assert!(!summary.is_empty());

        summary.theoretical_hours = Decimal::ZERO;
        summary.missing_hours = Decimal::ZERO;
        assert!(summary.is_idle());
        assert!(!summary.is_empty());
        summary.overtime_pay = Decimal::ZERO;
        summary.advance_deduction = Decimal::ZERO;
        assert!(summary.is_empty());
    }

    #[test]
    fn test_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&AdvanceDeductionPolicy::GrantedInPeriod).unwrap(),
            "\"granted_in_period\""
        );
        let policy: AdvanceDeductionPolicy = serde_json::from_str("\"amortized\"").unwrap();
        assert_eq!(policy, AdvanceDeductionPolicy::Amortized);
        assert_eq!(AdvanceDeductionPolicy::default(), AdvanceDeductionPolicy::GrantedInPeriod);
    }

    #[test]
    fn test_summary_serializes_decimals_as_strings() {
        let json = serde_json::to_string(&create_summary("180", "17500")).unwrap();
        assert!(json.contains("\"net_pay\":\"17500\""));
        assert!(json.contains("\"advance_policy\":\"granted_in_period\""));
        assert!(json.contains("\"working_days\":20"));
    }
}
