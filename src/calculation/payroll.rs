//! Payroll summary calculation.
//!
//! This module combines the working-days, attendance, overtime and advance
//! calculators into a [`PayrollSummary`] for one employee and one period, and
//! runs that calculation across a [`PayrollSnapshot`] for whole-period batches
//! and per-employee annual reports.
//!
//! Every function here is pure over its inputs. Amortized advance balances are
//! returned as [`BalanceUpdate`]s for the caller to persist.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdvanceDeductionPolicy, AdvanceEntry, AnnualReport, AttendanceEntry, AuditStep, AuditTrace,
    AuditWarning, BalanceUpdate, Employee, OvertimeEntry, PayrollPeriod, PayrollSnapshot,
    PayrollSummary, PayrollTotals, PeriodPayroll,
};

use super::amortization::{
    AmortizationResult, apply_balance_updates, calculate_amortized_deduction,
};
use super::attendance::calculate_lost_hours;
use super::overtime::calculate_overtime_total;
use super::working_days::calculate_working_days;

/// Options for batch and annual payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollOptions {
    /// Which rule determines the advance deduction.
    pub advance_policy: AdvanceDeductionPolicy,
    /// Whether inactive employees are included in a period run.
    pub include_inactive: bool,
    /// Whether a period run leaves out employees with neither theoretical nor
    /// missing hours. An employee with overtime or a deduction is kept.
    pub skip_idle_employees: bool,
}

impl Default for PayrollOptions {
    fn default() -> Self {
        Self {
            advance_policy: AdvanceDeductionPolicy::default(),
            include_inactive: true,
            skip_idle_employees: false,
        }
    }
}

/// The advance deduction figure with its audit step.
struct AdvanceDeduction {
    amount: Decimal,
    audit_step: AuditStep,
    warnings: Vec<AuditWarning>,
}

fn granted_in_period_deduction(
    advances_in_period: &[AdvanceEntry],
    step_number: u32,
) -> EngineResult<AdvanceDeduction> {
    let amount = advances_in_period
        .iter()
        .try_fold(Decimal::ZERO, |total, a| total.checked_add(a.amount))
        .ok_or_else(|| EngineError::out_of_range("advance deduction"))?;

    Ok(AdvanceDeduction {
        amount,
        audit_step: AuditStep {
            step_number,
            rule_id: "advance_deduction_granted".to_string(),
            rule_name: "Advance Deduction (Granted in Period)".to_string(),
            input: serde_json::json!({
                "advances": advances_in_period.iter().map(|a| serde_json::json!({
                    "id": a.id,
                    "date": a.date.map(|d| d.to_string()),
                    "amount": a.amount.normalize().to_string()
                })).collect::<Vec<_>>()
            }),
            output: serde_json::json!({
                "advance_deduction": amount.normalize().to_string()
            }),
            reasoning: format!(
                "Deducted the full principal of {} advance(s) granted in the period: {}",
                advances_in_period.len(),
                amount.normalize()
            ),
        },
        warnings: Vec::new(),
    })
}

fn step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input,
        output,
        reasoning,
    }
}

/// Runs steps 1 to 8 with the advance deduction supplied by the caller.
#[allow(clippy::too_many_arguments)]
fn build_summary(
    employee: &Employee,
    period: &PayrollPeriod,
    settings: &Settings,
    attendance: &[AttendanceEntry],
    overtime: &[OvertimeEntry],
    today: NaiveDate,
    policy: AdvanceDeductionPolicy,
    deduction: impl FnOnce(u32) -> EngineResult<AdvanceDeduction>,
) -> EngineResult<PayrollSummary> {
    settings.validate()?;
    employee.validate()?;

    let mut audit_trace = AuditTrace::default();
    let daily_hours = settings.daily_standard_hours;

    // Step 1: working days
    let days = calculate_working_days(
        employee.start_date,
        period,
        settings.include_weekends,
        today,
        1,
    );
    let working_days = days.working_days;
    audit_trace.steps.push(days.audit_step);
    audit_trace.warnings.extend(days.warning);

    // Step 2: theoretical hours
    let theoretical_hours = Decimal::from(working_days)
        .checked_mul(daily_hours)
        .ok_or_else(|| EngineError::out_of_range("theoretical hours"))?;
    audit_trace.steps.push(step(
        2,
        "theoretical_hours",
        "Theoretical Hours",
        serde_json::json!({
            "working_days": working_days,
            "daily_standard_hours": daily_hours.normalize().to_string()
        }),
        serde_json::json!({ "theoretical_hours": theoretical_hours.normalize().to_string() }),
        format!(
            "{} day(s) x {} hour(s) = {}",
            working_days,
            daily_hours.normalize(),
            theoretical_hours.normalize()
        ),
    ));

    // Step 3: lost hours
    let lost = calculate_lost_hours(attendance, daily_hours, 3)?;
    let missing_hours = lost.lost_hours;
    audit_trace.steps.push(lost.audit_step);

    // Step 4: net hours, floored at zero; both operands are non-negative
    let net_hours = (theoretical_hours - missing_hours).max(Decimal::ZERO);
    audit_trace.steps.push(step(
        4,
        "net_hours",
        "Net Worked Hours",
        serde_json::json!({
            "theoretical_hours": theoretical_hours.normalize().to_string(),
            "missing_hours": missing_hours.normalize().to_string()
        }),
        serde_json::json!({ "net_hours": net_hours.normalize().to_string() }),
        if missing_hours > theoretical_hours {
            format!(
                "Missing hours {} exceed theoretical hours {}; net hours floored at 0",
                missing_hours.normalize(),
                theoretical_hours.normalize()
            )
        } else {
            format!(
                "{} - {} = {}",
                theoretical_hours.normalize(),
                missing_hours.normalize(),
                net_hours.normalize()
            )
        },
    ));

    // Step 5: base pay
    let base_pay = net_hours
        .checked_mul(employee.hourly_rate)
        .ok_or_else(|| EngineError::out_of_range("base pay"))?;
    audit_trace.steps.push(step(
        5,
        "base_pay",
        "Base Pay",
        serde_json::json!({
            "net_hours": net_hours.normalize().to_string(),
            "hourly_rate": employee.hourly_rate.normalize().to_string()
        }),
        serde_json::json!({ "base_pay": base_pay.normalize().to_string() }),
        format!(
            "{} hour(s) x {} = {}",
            net_hours.normalize(),
            employee.hourly_rate.normalize(),
            base_pay.normalize()
        ),
    ));

    // Step 6: overtime
    let ot = calculate_overtime_total(overtime, 6)?;
    audit_trace.steps.push(ot.audit_step);

    // Step 7: advance deduction
    let deduction = deduction(7)?;
    audit_trace.steps.push(deduction.audit_step);
    audit_trace.warnings.extend(deduction.warnings);

    // Step 8: net pay
    let net_pay = base_pay
        .checked_add(ot.totals.amount)
        .and_then(|gross| gross.checked_sub(deduction.amount))
        .ok_or_else(|| EngineError::out_of_range("net pay"))?;
    audit_trace.steps.push(step(
        8,
        "net_pay",
        "Net Pay",
        serde_json::json!({
            "base_pay": base_pay.normalize().to_string(),
            "overtime_pay": ot.totals.amount.normalize().to_string(),
            "advance_deduction": deduction.amount.normalize().to_string()
        }),
        serde_json::json!({ "net_pay": net_pay.normalize().to_string() }),
        format!(
            "{} + {} - {} = {}",
            base_pay.normalize(),
            ot.totals.amount.normalize(),
            deduction.amount.normalize(),
            net_pay.normalize()
        ),
    ));

    debug!(
        employee_id = %employee.id,
        period = %period,
        net_pay = %net_pay,
        "Computed payroll summary"
    );

    Ok(PayrollSummary {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        period: *period,
        working_days,
        theoretical_hours,
        missing_hours,
        net_hours,
        base_pay,
        overtime_hours: ot.totals.hours,
        overtime_pay: ot.totals.amount,
        advance_deduction: deduction.amount,
        net_pay,
        advance_policy: policy,
        audit_trace,
    })
}

/// Computes the payroll summary for one employee in one period.
///
/// The entry lists must already be scoped to the employee and period. The
/// advance deduction is the full principal of every advance in
/// `advances_in_period`.
///
/// # Errors
///
/// Returns `InvalidSettings` or `InvalidEmployee` when either input fails
/// validation, and `CalculationError` when a figure does not fit in a
/// `Decimal`. Unreadable dates never fail the calculation; they are recorded
/// as warnings in the audit trace.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_summary;
/// use payroll_engine::config::Settings;
/// use payroll_engine::models::{Employee, PayrollPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new("emp_001", "Ayse", Decimal::from(100), NaiveDate::from_ymd_opt(2020, 1, 1));
/// let period = PayrollPeriod::new(2025, 12).unwrap();
/// let settings = Settings::new(Decimal::from(10), Decimal::new(15, 1), false).unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
///
/// let summary = compute_summary(&employee, &period, &settings, &[], &[], &[], today).unwrap();
/// assert_eq!(summary.working_days, 23);
/// assert_eq!(summary.net_pay, Decimal::from(23_000));
/// ```
pub fn compute_summary(
    employee: &Employee,
    period: &PayrollPeriod,
    settings: &Settings,
    attendance: &[AttendanceEntry],
    overtime: &[OvertimeEntry],
    advances_in_period: &[AdvanceEntry],
    today: NaiveDate,
) -> EngineResult<PayrollSummary> {
    build_summary(
        employee,
        period,
        settings,
        attendance,
        overtime,
        today,
        AdvanceDeductionPolicy::GrantedInPeriod,
        |step_number| granted_in_period_deduction(advances_in_period, step_number),
    )
}

/// Computes the payroll summary with one amortized installment deducted from
/// every open advance.
///
/// Returns the summary together with the balance updates the caller must
/// persist once the run is accepted.
pub fn compute_summary_amortized(
    employee: &Employee,
    period: &PayrollPeriod,
    settings: &Settings,
    attendance: &[AttendanceEntry],
    overtime: &[OvertimeEntry],
    open_advances: &[AdvanceEntry],
    today: NaiveDate,
) -> EngineResult<(PayrollSummary, AmortizationResult)> {
    let mut amortization = AmortizationResult::default();
    let summary = build_summary(
        employee,
        period,
        settings,
        attendance,
        overtime,
        today,
        AdvanceDeductionPolicy::Amortized,
        |step_number| {
            let result = calculate_amortized_deduction(open_advances, step_number);
            amortization = result.amortization.clone();
            Ok(AdvanceDeduction {
                amount: result.amortization.total_cut,
                audit_step: result.audit_step,
                warnings: result.amortization.warnings,
            })
        },
    )?;
    Ok((summary, amortization))
}

/// Computes payroll for every employee in the snapshot for one period.
///
/// Summaries are ordered by employee name, then ID. An employee whose record
/// fails validation, or whose figures overflow, is left out and reported in
/// the result's warnings so the rest of the run can complete. With
/// [`PayrollOptions::skip_idle_employees`] set, employees with no hours, no
/// overtime and no deduction are left out silently.
///
/// # Errors
///
/// Returns `InvalidSettings` when the settings fail validation.
pub fn compute_period_payroll(
    snapshot: &PayrollSnapshot,
    period: &PayrollPeriod,
    settings: &Settings,
    today: NaiveDate,
    options: &PayrollOptions,
) -> EngineResult<PeriodPayroll> {
    settings.validate()?;

    let mut employees: Vec<&Employee> = snapshot
        .employees
        .iter()
        .filter(|e| options.include_inactive || e.active)
        .collect();
    employees.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let mut summaries = Vec::with_capacity(employees.len());
    let mut totals = PayrollTotals::default();
    let mut balance_updates = Vec::new();
    let mut warnings = Vec::new();

    for employee in employees {
        let entries = snapshot.entries_for(&employee.id, period);

        let outcome = match options.advance_policy {
            AdvanceDeductionPolicy::GrantedInPeriod => compute_summary(
                employee,
                period,
                settings,
                &entries.attendance,
                &entries.overtime,
                &entries.advances_granted,
                today,
            )
            .map(|summary| (summary, Vec::new())),
            AdvanceDeductionPolicy::Amortized => compute_summary_amortized(
                employee,
                period,
                settings,
                &entries.attendance,
                &entries.overtime,
                &entries.open_advances,
                today,
            )
            .map(|(summary, amortization)| (summary, amortization.updates)),
        };

        let outcome = outcome.and_then(|(summary, updates)| {
            if options.skip_idle_employees && summary.is_empty() {
                return Ok(None);
            }
            totals.add(&summary)?;
            Ok(Some((summary, updates)))
        });

        match outcome {
            Ok(Some((mut summary, updates))) => {
                summary.audit_trace.warnings.extend(entries.warnings);
                balance_updates.extend(updates);
                summaries.push(summary);
            }
            Ok(None) => {
                debug!(employee_id = %employee.id, period = %period, "Skipping idle employee");
            }
            Err(err) => {
                warn!(employee_id = %employee.id, error = %err, "Skipping employee");
                warnings.push(AuditWarning::new(
                    "EMPLOYEE_SKIPPED",
                    format!("Employee '{}' was skipped: {}", employee.id, err),
                    "high",
                ));
            }
        }
    }

    info!(
        period = %period,
        policy = %options.advance_policy,
        employees = totals.employee_count,
        skipped = warnings.len(),
        net_pay = %totals.net_pay,
        "Period payroll computed"
    );

    Ok(PeriodPayroll {
        period: *period,
        advance_policy: options.advance_policy,
        summaries,
        totals,
        balance_updates,
        warnings,
    })
}

/// Collapses a sequence of per-month updates into one update per advance.
fn merge_updates(updates: Vec<BalanceUpdate>) -> Vec<BalanceUpdate> {
    let mut merged: Vec<BalanceUpdate> = Vec::new();
    for update in updates {
        match merged.iter_mut().find(|m| m.advance_id == update.advance_id) {
            Some(existing) => {
                existing.cut += update.cut;
                existing.new_remaining = update.new_remaining;
            }
            None => merged.push(update),
        }
    }
    merged
}

/// Computes month-by-month payroll for one employee across a calendar year.
///
/// Months that start after `today`, months that end before the employee's
/// start date, and months with no activity are left out. Under the amortized
/// policy each month's balances carry into the next, and the returned balance
/// updates hold the state after the last month.
///
/// # Errors
///
/// Returns `EmployeeNotFound` for an unknown employee, `InvalidPeriod` for an
/// unrepresentable year, validation errors for bad settings or employee
/// records, and `CalculationError` when a figure overflows.
pub fn compute_annual_report(
    snapshot: &PayrollSnapshot,
    employee_id: &str,
    year: i32,
    settings: &Settings,
    today: NaiveDate,
    options: &PayrollOptions,
) -> EngineResult<AnnualReport> {
    settings.validate()?;
    let employee = snapshot.employee(employee_id)?;
    employee.validate()?;

    let mut balances: Vec<AdvanceEntry> = snapshot
        .advances
        .iter()
        .filter(|a| a.employee_id == employee.id)
        .cloned()
        .collect();
    let mut all_updates = Vec::new();
    let mut months = Vec::new();

    for period in PayrollPeriod::months_of_year(year)? {
        if period.start_date() > today {
            break;
        }
        if employee
            .start_date
            .is_some_and(|start| period.last_day() < start)
        {
            continue;
        }

        let entries = snapshot.entries_for(&employee.id, &period);

        let mut summary = match options.advance_policy {
            AdvanceDeductionPolicy::GrantedInPeriod => compute_summary(
                employee,
                &period,
                settings,
                &entries.attendance,
                &entries.overtime,
                &entries.advances_granted,
                today,
            )?,
            AdvanceDeductionPolicy::Amortized => {
                let open: Vec<AdvanceEntry> = balances
                    .iter()
                    .filter(|a| a.is_open() && a.date.is_some_and(|d| d < period.end_date()))
                    .cloned()
                    .collect();
                let (summary, amortization) = compute_summary_amortized(
                    employee,
                    &period,
                    settings,
                    &entries.attendance,
                    &entries.overtime,
                    &open,
                    today,
                )?;
                apply_balance_updates(&mut balances, &amortization.updates);
                all_updates.extend(amortization.updates);
                summary
            }
        };

        if summary.is_empty() {
            debug!(employee_id = %employee.id, period = %period, "Skipping empty month");
            continue;
        }
        summary.audit_trace.warnings.extend(entries.warnings);
        months.push(summary);
    }

    let totals = PayrollTotals::from_summaries(&months)?;

    info!(
        employee_id = %employee.id,
        year,
        months = months.len(),
        net_pay = %totals.net_pay,
        "Annual report computed"
    );

    Ok(AnnualReport {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        year,
        months,
        totals,
        balance_updates: merge_updates(all_updates),
    })
}
