//! Cash advance amortization.
//!
//! Each open advance is repaid in equal installments of
//! `principal / installments`, one per elapsed period, oldest advance first.
//! The installment is rounded up to the cent, so a schedule closes in exactly
//! `installments` periods with the last cut slightly smaller: 1000 over three
//! installments cuts 333.34, 333.34 and 333.32. The final installment takes
//! whatever is left.
//!
//! Amortization is pure: it returns the new balances as [`BalanceUpdate`]s and
//! leaves persisting them, and guarding against applying the same period
//! twice, to the caller.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{AdvanceEntry, AuditStep, AuditWarning, BalanceUpdate};

/// The outcome of amortizing a set of advances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmortizationResult {
    /// Sum of all cuts.
    pub total_cut: Decimal,
    /// One update per processed advance, in processing order.
    pub updates: Vec<BalanceUpdate>,
    /// Advances that were skipped or corrected.
    pub warnings: Vec<AuditWarning>,
}

/// Amortized deduction with its audit step.
#[derive(Debug, Clone)]
pub struct AmortizedDeductionResult {
    /// The amortization outcome.
    pub amortization: AmortizationResult,
    /// The audit step recording the deduction.
    pub audit_step: AuditStep,
}

/// One installment cut against a balance: `(cut, new_remaining)`.
fn cut_installment(remaining: Decimal, installment: Decimal) -> (Decimal, Decimal) {
    if remaining <= Decimal::ZERO {
        (Decimal::ZERO, Decimal::ZERO)
    } else if remaining <= installment {
        (remaining, Decimal::ZERO)
    } else {
        (installment, remaining - installment)
    }
}

/// Amortizes open advances over `periods_elapsed` periods.
///
/// Advances are processed in grant-date order, ties broken by ID. An advance
/// with a non-positive installment count is skipped with a warning; a balance
/// above the principal is clamped to the principal first. An advance whose cut
/// would overflow the running total is skipped with a warning and left
/// unchanged.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::amortize;
/// use payroll_engine::models::AdvanceEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let advance = AdvanceEntry::grant("adv_1", "emp_1", date, Decimal::from(900), 3, "").unwrap();
///
/// let result = amortize(&[advance], 1);
/// assert_eq!(result.total_cut, Decimal::from(300));
/// assert_eq!(result.updates[0].new_remaining, Decimal::from(600));
/// ```
pub fn amortize(advances: &[AdvanceEntry], periods_elapsed: u32) -> AmortizationResult {
    let mut ordered: Vec<&AdvanceEntry> = advances.iter().collect();
    ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let mut result = AmortizationResult::default();

    for advance in ordered {
        let Some(installment) = advance.installment_amount() else {
            warn!(
                advance_id = %advance.id,
                installments = advance.installments,
                "Skipping advance with invalid installment count"
            );
            result.warnings.push(AuditWarning::new(
                "INVALID_INSTALLMENTS",
                format!(
                    "Advance '{}' has {} installments and was skipped",
                    advance.id, advance.installments
                ),
                "high",
            ));
            continue;
        };

        let mut remaining = advance.remaining;
        if remaining > advance.amount {
            warn!(advance_id = %advance.id, "Advance balance exceeds principal; clamping");
            result.warnings.push(AuditWarning::new(
                "BALANCE_ABOVE_PRINCIPAL",
                format!(
                    "Advance '{}' balance {} exceeds principal {}; clamped",
                    advance.id,
                    advance.remaining.normalize(),
                    advance.amount.normalize()
                ),
                "medium",
            ));
            remaining = advance.amount;
        }

        let previous_remaining = remaining.max(Decimal::ZERO);
        let mut cut = Decimal::ZERO;
        for _ in 0..periods_elapsed {
            if remaining <= Decimal::ZERO {
                break;
            }
            let (this_cut, next) = cut_installment(remaining, installment);
            cut += this_cut;
            remaining = next;
        }
        let new_remaining = remaining.max(Decimal::ZERO);

        debug!(
            advance_id = %advance.id,
            cut = %cut,
            new_remaining = %new_remaining,
            "Amortized advance"
        );

        let Some(total_cut) = result.total_cut.checked_add(cut) else {
            warn!(advance_id = %advance.id, "Total cut out of range; skipping advance");
            result.warnings.push(AuditWarning::new(
                "AMOUNT_OUT_OF_RANGE",
                format!(
                    "Advance '{}' would push the total cut out of range and was skipped",
                    advance.id
                ),
                "high",
            ));
            continue;
        };
        result.total_cut = total_cut;
        result.updates.push(BalanceUpdate {
            advance_id: advance.id.clone(),
            employee_id: advance.employee_id.clone(),
            previous_remaining,
            cut,
            new_remaining,
        });
    }

    result
}

/// Amortizes one period of open advances and records an audit step.
pub fn calculate_amortized_deduction(
    open_advances: &[AdvanceEntry],
    step_number: u32,
) -> AmortizedDeductionResult {
    let amortization = amortize(open_advances, 1);

    let audit_step = AuditStep {
        step_number,
        rule_id: "advance_deduction_amortized".to_string(),
        rule_name: "Advance Deduction (Amortized)".to_string(),
        input: serde_json::json!({
            "open_advances": open_advances.iter().map(|a| serde_json::json!({
                "id": a.id,
                "amount": a.amount.normalize().to_string(),
                "installments": a.installments,
                "remaining": a.remaining.normalize().to_string()
            })).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "advance_deduction": amortization.total_cut.normalize().to_string(),
            "updates": amortization.updates.iter().map(|u| serde_json::json!({
                "advance_id": u.advance_id,
                "cut": u.cut.normalize().to_string(),
                "new_remaining": u.new_remaining.normalize().to_string()
            })).collect::<Vec<_>>()
        }),
        reasoning: format!(
            "Cut one installment from {} open advance(s), {} in total",
            amortization.updates.len(),
            amortization.total_cut.normalize()
        ),
    };

    AmortizedDeductionResult {
        amortization,
        audit_step,
    }
}

/// Writes balance updates back onto advances.
///
/// Each new balance is clamped to `[0, current remaining]`, so replaying an
/// update can never raise a balance. Returns the IDs of updates whose advance
/// was not found.
pub fn apply_balance_updates(
    advances: &mut [AdvanceEntry],
    updates: &[BalanceUpdate],
) -> Vec<String> {
    let mut unknown = Vec::new();
    for update in updates {
        match advances.iter_mut().find(|a| a.id == update.advance_id) {
            Some(advance) => {
                let current = advance.remaining.max(Decimal::ZERO);
                advance.remaining = update.new_remaining.max(Decimal::ZERO).min(current);
            }
            None => {
                warn!(advance_id = %update.advance_id, "Balance update for unknown advance");
                unknown.push(update.advance_id.clone());
            }
        }
    }
    unknown
}
