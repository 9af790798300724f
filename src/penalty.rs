use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::balance::DAYS_PER_MONTH;
use crate::decimal::{Money, Rate};
use crate::loan::Loan;
use crate::types::LoanStatus;

/// house fallback rates applied when a contract carries no penalty terms
///
/// a contract storing an explicit zero keeps that zero; only absent values
/// fall back here. losing that distinction (truthiness instead of presence)
/// silently re-penalizes waived contracts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverdueDefaults {
    /// flat one-time fine percent
    pub fine: Rate,
    /// moratory interest percent per month, accrued pro-rata daily
    pub mora: Rate,
}

impl Default for OverdueDefaults {
    fn default() -> Self {
        Self {
            fine: Rate::from_percent(dec!(2)),
            mora: Rate::from_percent(dec!(1)),
        }
    }
}

/// calculator for the inflated amount owed on an overdue installment
#[derive(Debug, Clone, Copy)]
pub struct OverdueCalculator {
    pub defaults: OverdueDefaults,
    days_per_month: u32,
}

impl Default for OverdueCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl OverdueCalculator {
    pub fn new() -> Self {
        Self {
            defaults: OverdueDefaults::default(),
            days_per_month: DAYS_PER_MONTH,
        }
    }

    pub fn with_defaults(defaults: OverdueDefaults) -> Self {
        Self {
            defaults,
            days_per_month: DAYS_PER_MONTH,
        }
    }

    /// amount owed today for an installment of `amount` due on `due_date`
    ///
    /// returns the amount unchanged unless the status is delinquent
    /// (`Overdue` or `Agreement`) and the due date is strictly in the past,
    /// compared as calendar dates so time-of-day never shifts the boundary.
    /// the fine is flat; moratory interest accrues simple (not compounding)
    /// per day elapsed.
    pub fn updated_amount(
        &self,
        amount: Money,
        due_date: NaiveDate,
        status: LoanStatus,
        fine_percent: Option<Rate>,
        mora_percent: Option<Rate>,
        time: &SafeTimeProvider,
    ) -> Money {
        if !matches!(status, LoanStatus::Overdue | LoanStatus::Agreement) {
            return amount;
        }

        let today = time.now().date_naive();
        if due_date >= today {
            return amount;
        }

        let days = (today - due_date).num_days();

        let fine_rate = fine_percent.unwrap_or(self.defaults.fine);
        let fine = amount * fine_rate.as_decimal();

        let mora_rate = mora_percent.unwrap_or(self.defaults.mora);
        let daily = mora_rate.daily_rate(self.days_per_month).as_decimal();
        let mora = amount * (daily * Decimal::from(days));

        amount + fine + mora
    }

    /// amount owed today on a loan's next installment, using its own terms
    pub fn for_loan(&self, loan: &Loan, time: &SafeTimeProvider) -> Money {
        self.updated_amount(
            loan.installment_value,
            loan.next_due,
            loan.real_status(time),
            loan.fine_rate,
            loan.mora_rate,
            time,
        )
    }

    /// whole days past due as of now; zero when due today or later
    pub fn days_overdue(&self, due_date: NaiveDate, time: &SafeTimeProvider) -> i64 {
        (time.now().date_naive() - due_date).num_days().max(0)
    }
}
