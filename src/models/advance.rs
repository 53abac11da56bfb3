//! Cash advance model and balance updates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::lenient;

/// Number of decimal places money is settled to.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// A cash advance granted to an employee and repaid in installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceEntry {
    /// Unique identifier for the advance.
    pub id: String,
    /// The employee who received the advance.
    pub employee_id: String,
    /// The day the advance was granted; `None` if the stored date was unreadable.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Principal amount granted.
    pub amount: Decimal,
    /// Number of equal installments the principal is repaid over.
    ///
    /// Signed so that corrupt stored values can be represented and skipped.
    pub installments: i32,
    /// Outstanding balance, always within `[0, amount]`.
    pub remaining: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl AdvanceEntry {
    /// Grants a new advance with the full principal outstanding.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` if `amount` is not positive or `installments` is
    /// less than one.
    pub fn grant(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
        installments: i32,
        description: impl Into<String>,
    ) -> EngineResult<Self> {
        let id = id.into();
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidEntry {
                entry_id: id,
                message: format!("advance amount must be greater than 0, got {}", amount),
            });
        }
        if installments < 1 {
            return Err(EngineError::InvalidEntry {
                entry_id: id,
                message: format!("installments must be at least 1, got {}", installments),
            });
        }

        Ok(Self {
            id,
            employee_id: employee_id.into(),
            date: Some(date),
            amount,
            installments,
            remaining: amount,
            description: description.into(),
        })
    }

    /// Returns true while part of the advance is still outstanding.
    pub fn is_open(&self) -> bool {
        self.remaining > Decimal::ZERO
    }

    /// The amount cut per period, rounded up to the cent.
    ///
    /// Rounding up means `n` installments always settle the principal in `n`
    /// periods. Returns `None` when the installment count is not positive.
    ///
    /// ```
    /// use payroll_engine::models::AdvanceEntry;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    /// let advance = AdvanceEntry::grant("adv_1", "emp_1", date, Decimal::from(1000), 3, "").unwrap();
    /// assert_eq!(advance.installment_amount(), Some(Decimal::new(33334, 2)));
    /// ```
    pub fn installment_amount(&self) -> Option<Decimal> {
        if self.installments <= 0 {
            return None;
        }
        Some(
            (self.amount / Decimal::from(self.installments)).round_dp_with_strategy(
                CURRENCY_DECIMAL_PLACES,
                RoundingStrategy::ToPositiveInfinity,
            ),
        )
    }
}

/// A new outstanding balance for one advance, produced by amortization.
///
/// The engine never writes balances itself; callers persist these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceUpdate {
    /// The advance being updated.
    pub advance_id: String,
    /// The employee owning the advance.
    pub employee_id: String,
    /// Balance before this amortization.
    pub previous_remaining: Decimal,
    /// Amount deducted by this amortization.
    pub cut: Decimal,
    /// Balance after this amortization.
    pub new_remaining: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn grant_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 5).unwrap()
    }

    #[test]
    fn test_grant_starts_with_full_balance() {
        let advance =
            AdvanceEntry::grant("adv_001", "emp_001", grant_date(), dec("900"), 3, "rent").unwrap();
        assert_eq!(advance.remaining, dec("900"));
        assert!(advance.is_open());
        assert_eq!(advance.installment_amount(), Some(dec("300")));
    }

    #[test]
    fn test_grant_rejects_zero_installments() {
        let result = AdvanceEntry::grant("adv_002", "emp_001", grant_date(), dec("900"), 0, "");
        match result {
            Err(EngineError::InvalidEntry { entry_id, message }) => {
                assert_eq!(entry_id, "adv_002");
                assert!(message.contains("installments"));
            }
            _ => panic!("Expected InvalidEntry error"),
        }
    }

    #[test]
    fn test_grant_rejects_non_positive_amount() {
        assert!(AdvanceEntry::grant("adv_003", "emp_001", grant_date(), dec("0"), 1, "").is_err());
    }

    #[test]
    fn test_installment_amount_none_for_corrupt_count() {
        let mut advance =
            AdvanceEntry::grant("adv_004", "emp_001", grant_date(), dec("500"), 2, "").unwrap();
        advance.installments = -1;
        assert_eq!(advance.installment_amount(), None);
    }

    #[test]
    fn test_settled_advance_is_not_open() {
        let mut advance =
            AdvanceEntry::grant("adv_005", "emp_001", grant_date(), dec("500"), 1, "").unwrap();
        advance.remaining = Decimal::ZERO;
        assert!(!advance.is_open());
    }
}
