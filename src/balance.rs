use chrono::{DateTime, NaiveTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::Loan;
use crate::types::InterestMethod;

/// pro-rata month basis for daily interest
pub const DAYS_PER_MONTH: u32 = 30;

/// one row of a replayed statement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: DateTime<Utc>,
    /// whole days accrued since the previous event, rounded up
    pub days_accrued: i64,
    pub interest_accrued: Money,
    pub payment: Money,
    /// balance after accrual and payment
    pub balance: Money,
}

/// running-balance ("conta corrente") engine
///
/// replays a loan's full payment history chronologically, compounding daily
/// interest on the outstanding balance and netting off payments, to produce
/// the true balance owed right now. this is deliberately a different lens
/// from [`crate::breakdown::InstallmentBreakdown`]: each payment's full
/// amount reduces the running balance, interest receipts included, the way a
/// current account nets deposits. the two views agree at the start of a
/// cycle with no intervening payments.
#[derive(Debug, Clone, Copy)]
pub struct LedgerEngine {
    days_per_month: u32,
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerEngine {
    pub fn new() -> Self {
        Self {
            days_per_month: DAYS_PER_MONTH,
        }
    }

    /// engine with a non-standard month basis
    pub fn with_month_basis(days_per_month: u32) -> Self {
        Self { days_per_month }
    }

    /// true outstanding balance as of now, floored at zero
    ///
    /// overpayment is not modeled as credit in this view
    pub fn current_balance(&self, loan: &Loan, time: &SafeTimeProvider) -> Money {
        match loan.interest_type {
            InterestMethod::Simple => self.simple_balance(loan),
            InterestMethod::Price => self
                .statement(loan, time)
                .last()
                .map(|entry| entry.balance)
                .unwrap_or(loan.amount),
        }
    }

    /// the replay as inspectable rows, ending with a projection to now
    ///
    /// input records are never mutated; the history is sorted by event date
    /// into a scratch list first
    pub fn statement(&self, loan: &Loan, time: &SafeTimeProvider) -> Vec<LedgerEntry> {
        match loan.interest_type {
            InterestMethod::Simple => self.simple_statement(loan, time),
            InterestMethod::Price => self.compounding_statement(loan, time),
        }
    }

    /// simple contracts track explicit capital reductions only, no compounding
    fn simple_balance(&self, loan: &Loan) -> Money {
        let paid_capital: Money = loan.history.iter().map(|r| r.capital_paid).sum();
        (loan.amount - paid_capital).max(Money::ZERO)
    }

    fn simple_statement(&self, loan: &Loan, time: &SafeTimeProvider) -> Vec<LedgerEntry> {
        let mut balance = loan.amount;
        let mut entries = Vec::new();

        for record in loan.history_by_date() {
            if !record.kind.is_financial() {
                continue;
            }
            balance = (balance - record.capital_paid).max(Money::ZERO);
            entries.push(LedgerEntry {
                date: record.date,
                days_accrued: 0,
                interest_accrued: Money::ZERO,
                payment: record.amount,
                balance,
            });
        }

        entries.push(LedgerEntry {
            date: time.now(),
            days_accrued: 0,
            interest_accrued: Money::ZERO,
            payment: Money::ZERO,
            balance,
        });
        entries
    }

    fn compounding_statement(&self, loan: &Loan, time: &SafeTimeProvider) -> Vec<LedgerEntry> {
        let daily_rate = loan.interest_rate.daily_rate(self.days_per_month).as_decimal();
        let mut balance = loan.amount;
        let mut cursor = start_of_day(loan);
        let mut entries = Vec::new();

        for record in loan.history_by_date() {
            // opening seeds time zero only
            if !record.kind.is_financial() {
                continue;
            }
            let days = days_between_ceil(cursor, record.date);
            let interest = balance * (daily_rate * Decimal::from(days));
            balance += interest;
            // the full amount nets off, not just the capital portion;
            // overpayment clamps at zero instead of turning into credit,
            // so no further interest accrues on a negative balance
            balance = (balance - record.amount).max(Money::ZERO);
            cursor = record.date;

            entries.push(LedgerEntry {
                date: record.date,
                days_accrued: days,
                interest_accrued: interest,
                payment: record.amount,
                balance,
            });
        }

        // project to the present moment
        let now = time.now();
        let days = days_between_ceil(cursor, now);
        let interest = balance * (daily_rate * Decimal::from(days));
        balance += interest;

        entries.push(LedgerEntry {
            date: now,
            days_accrued: days,
            interest_accrued: interest,
            payment: Money::ZERO,
            balance,
        });
        entries
    }
}

fn start_of_day(loan: &Loan) -> DateTime<Utc> {
    loan.start_date.and_time(NaiveTime::MIN).and_utc()
}

/// whole days from `from` to `to`, rounded up, floored at zero
///
/// ceils over the full sub-second duration: any positive gap, however
/// small, is one day
fn days_between_ceil(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let millis = (to - from).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + 86_399_999) / 86_400_000
    }
}
