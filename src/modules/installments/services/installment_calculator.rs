use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::installments::models::{Dispatch, InstallmentSchedule};

/// Smallest plan total accepted, in minor units
pub const MINIMUM_PLAN_AMOUNT: i64 = 1;

/// Number of invoices a plan is split into
pub const INSTALLMENT_COUNT: u32 = 2;

/// Calculator for two-part installment schedules
///
/// Each installment is `floor(total / 2)`. The remainder of an odd total is
/// dropped: the second installment does not absorb it.
pub struct InstallmentCalculator;

impl InstallmentCalculator {
    /// Reject totals below one cent
    pub fn validate_total(total: i64) -> Result<()> {
        if total < MINIMUM_PLAN_AMOUNT {
            return Err(AppError::validation("Amount must be at least $0.01"));
        }
        Ok(())
    }

    /// Amount charged by each installment
    pub fn amount_per_installment(total: i64) -> Result<i64> {
        Self::validate_total(total)?;
        Ok(total / INSTALLMENT_COUNT as i64)
    }

    /// Cents lost to floor division
    pub fn dropped_remainder(total: i64) -> i64 {
        total.max(0) % INSTALLMENT_COUNT as i64
    }

    /// Build the invoice schedule for a plan total
    ///
    /// # Arguments
    /// * `total` - Plan total in minor units
    /// * `second_days_until_due` - Days until the deferred installment is due
    ///
    /// # Returns
    /// Installment 1 due immediately and sent now, installment 2 deferred
    pub fn calculate_schedules(
        total: i64,
        second_days_until_due: u32,
    ) -> Result<Vec<InstallmentSchedule>> {
        let amount = Self::amount_per_installment(total)?;

        let remainder = Self::dropped_remainder(total);
        if remainder > 0 {
            debug!(total, remainder, "Odd total, remainder not charged");
        }

        Ok(vec![
            InstallmentSchedule {
                installment_number: 1,
                installment_count: INSTALLMENT_COUNT,
                amount,
                days_until_due: 0,
                dispatch: Dispatch::SendNow,
            },
            InstallmentSchedule {
                installment_number: 2,
                installment_count: INSTALLMENT_COUNT,
                amount,
                days_until_due: second_days_until_due,
                dispatch: Dispatch::Deferred,
            },
        ])
    }
}
