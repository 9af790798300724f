use chrono::{Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{
    CycleTotals, InterestMethod, LoanId, LoanStatus, PaidTotals, PaymentFrequency, PaymentRecord,
    RecordKind,
};

/// a consumer loan contract
///
/// `amount` is the principal as disbursed and is immutable for the life of the
/// contract; the outstanding balance is always derived from `history` (see
/// [`crate::balance::LedgerEngine`]). `history` is logically ordered by event
/// date but may be appended out of order, so consumers sort before replaying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub client: String,
    pub amount: Money,
    /// monthly rate
    pub interest_rate: Rate,
    /// remaining installment count, in month-equivalent periods
    pub installments: u32,
    pub installment_value: Money,
    pub interest_type: InterestMethod,
    pub frequency: PaymentFrequency,
    pub start_date: NaiveDate,
    pub next_due: NaiveDate,
    pub status: LoanStatus,
    /// flat late fine percent; `None` falls back to the house default,
    /// `Some(Rate::ZERO)` is an intentional waiver
    #[serde(default)]
    pub fine_rate: Option<Rate>,
    /// daily moratory interest percent per month; same nullish semantics
    #[serde(rename = "moraInterestRate", default)]
    pub mora_rate: Option<Rate>,
    #[serde(default)]
    pub total_paid_capital: Money,
    #[serde(default)]
    pub total_paid_interest: Money,
    /// surcharge while in a negotiated agreement; pure fee, never capital
    #[serde(default)]
    pub agreement_value: Money,
    #[serde(default)]
    pub projected_profit: Option<Money>,
    #[serde(default)]
    pub history: Vec<PaymentRecord>,
}

impl Loan {
    /// originate a contract, seeding the opening disbursement record
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        client: impl Into<String>,
        amount: Money,
        interest_rate: Rate,
        installments: u32,
        installment_value: Money,
        interest_type: InterestMethod,
        frequency: PaymentFrequency,
        start_date: NaiveDate,
        next_due: NaiveDate,
        time: &SafeTimeProvider,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client: client.into(),
            amount,
            interest_rate,
            installments,
            installment_value,
            interest_type,
            frequency,
            start_date,
            next_due,
            status: LoanStatus::Current,
            fine_rate: None,
            mora_rate: None,
            total_paid_capital: Money::ZERO,
            total_paid_interest: Money::ZERO,
            agreement_value: Money::ZERO,
            projected_profit: None,
            history: vec![PaymentRecord::opening(time.now(), amount)],
        }
    }

    /// origination-boundary guard over the contract terms
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(LoanError::InvalidPrincipal { amount: self.amount });
        }
        if self.interest_rate.is_negative() {
            return Err(LoanError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }
        if self.installments == 0 {
            return Err(LoanError::InvalidTerm {
                installments: self.installments,
            });
        }
        if self.installment_value.is_negative() {
            return Err(LoanError::InvalidInstallmentValue {
                amount: self.installment_value,
            });
        }
        for record in &self.history {
            if record.amount.is_negative() {
                return Err(LoanError::NegativeRecordAmount {
                    amount: record.amount,
                    date: record.date,
                });
            }
        }
        Ok(())
    }

    /// live status: the stored value may be stale, the due date decides
    ///
    /// `Paid` sticks; anything else is overdue exactly when the next due date
    /// is strictly in the past, compared as calendar dates.
    pub fn real_status(&self, time: &SafeTimeProvider) -> LoanStatus {
        if self.status == LoanStatus::Paid {
            return LoanStatus::Paid;
        }
        let today = time.now().date_naive();
        if self.next_due < today {
            LoanStatus::Overdue
        } else {
            LoanStatus::Current
        }
    }

    /// history sorted ascending by event date; the stored order is untouched
    pub fn history_by_date(&self) -> Vec<&PaymentRecord> {
        let mut records: Vec<&PaymentRecord> = self.history.iter().collect();
        records.sort_by_key(|r| r.date);
        records
    }

    /// interest/capital received since the current cycle opened
    ///
    /// the cycle opens the day after (next due − 1 month); receipts on or
    /// before that day belong to the previous cycle
    pub fn cycle_totals(&self) -> CycleTotals {
        let cycle_start = self
            .next_due
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.next_due);

        let mut totals = CycleTotals::default();
        for record in &self.history {
            if record.date.date_naive() > cycle_start {
                totals.interest += record.interest_paid;
                totals.capital += record.capital_paid;
            }
        }
        totals
    }

    /// recompute the paid accumulators from history
    ///
    /// opening records are skipped; records with no explicit split fall back
    /// to kind-based inference for histories written before the split existed
    pub fn paid_totals(&self) -> PaidTotals {
        let mut totals = PaidTotals::default();
        for record in &self.history {
            if !record.kind.is_financial() {
                continue;
            }
            if record.capital_paid.is_positive() || record.interest_paid.is_positive() {
                totals.capital += record.capital_paid;
                totals.interest += record.interest_paid;
            } else if record.kind == RecordKind::Interest {
                totals.interest += record.amount;
            } else {
                totals.capital += record.amount;
            }
        }
        totals
    }

    /// projected lifetime profit of the contract
    ///
    /// a stored positive projection wins; simple contracts earn every coupon,
    /// price contracts earn total receivable minus principal
    pub fn profit_projection(&self) -> Money {
        if let Some(stored) = self.projected_profit {
            if stored.is_positive() {
                return stored;
            }
        }
        let periods = Decimal::from(self.installments.max(1));
        match self.interest_type {
            InterestMethod::Simple => self.installment_value * periods,
            InterestMethod::Price => {
                let receivable = self.installment_value * Decimal::from(self.installments);
                (receivable - self.amount).max(Money::ZERO)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn test_time(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        ))
    }

    fn base_loan(time: &SafeTimeProvider) -> Loan {
        Loan::open(
            "Maria Souza",
            Money::from_major(1_000),
            Rate::from_percent(dec!(10)),
            10,
            Money::from_str_exact("162.75").unwrap(),
            InterestMethod::Price,
            PaymentFrequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            time,
        )
    }

    #[test]
    fn test_open_seeds_opening_record() {
        let time = test_time(2024, 1, 15);
        let loan = base_loan(&time);

        assert_eq!(loan.status, LoanStatus::Current);
        assert_eq!(loan.history.len(), 1);
        assert_eq!(loan.history[0].kind, RecordKind::Opening);
        assert_eq!(loan.history[0].amount, loan.amount);
        assert!(loan.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_terms() {
        let time = test_time(2024, 1, 15);

        let mut loan = base_loan(&time);
        loan.amount = Money::ZERO;
        assert!(matches!(loan.validate(), Err(LoanError::InvalidPrincipal { .. })));

        let mut loan = base_loan(&time);
        loan.interest_rate = Rate::from_percent(dec!(-1));
        assert!(matches!(loan.validate(), Err(LoanError::InvalidInterestRate { .. })));

        let mut loan = base_loan(&time);
        loan.installments = 0;
        assert!(matches!(loan.validate(), Err(LoanError::InvalidTerm { .. })));
    }

    #[test]
    fn test_real_status_follows_due_date() {
        let time = test_time(2024, 3, 1);
        let mut loan = base_loan(&time);

        // due 2024-02-15, today 2024-03-01
        assert_eq!(loan.real_status(&time), LoanStatus::Overdue);

        loan.next_due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(loan.real_status(&time), LoanStatus::Current);

        loan.next_due = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        loan.status = LoanStatus::Paid;
        assert_eq!(loan.real_status(&time), LoanStatus::Paid);
    }

    #[test]
    fn test_history_by_date_sorts_without_mutating() {
        let time = test_time(2024, 1, 15);
        let mut loan = base_loan(&time);
        let feb = Utc.with_ymd_and_hms(2024, 2, 15, 10, 0, 0).unwrap();
        let mar = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();

        // appended out of chronological order
        loan.history.push(PaymentRecord::receipt(
            mar,
            RecordKind::Installment,
            Money::from_major(100),
            Money::from_major(50),
        ));
        loan.history.push(PaymentRecord::receipt(
            feb,
            RecordKind::Installment,
            Money::from_major(100),
            Money::from_major(50),
        ));

        let sorted = loan.history_by_date();
        assert_eq!(sorted[1].date, feb);
        assert_eq!(sorted[2].date, mar);
        // stored order preserved
        assert_eq!(loan.history[1].date, mar);
    }

    #[test]
    fn test_cycle_totals_window() {
        let time = test_time(2024, 1, 15);
        let mut loan = base_loan(&time);
        loan.next_due = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        // before the cycle start (2024-02-15): excluded
        loan.history.push(PaymentRecord::receipt(
            Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap(),
            RecordKind::Installment,
            Money::from_major(100),
            Money::from_major(40),
        ));
        // inside the cycle: counted
        loan.history.push(PaymentRecord::receipt(
            Utc.with_ymd_and_hms(2024, 2, 20, 9, 0, 0).unwrap(),
            RecordKind::Installment,
            Money::from_major(80),
            Money::from_major(30),
        ));

        let totals = loan.cycle_totals();
        assert_eq!(totals.capital, Money::from_major(80));
        assert_eq!(totals.interest, Money::from_major(30));
    }

    #[test]
    fn test_paid_totals_skips_opening_and_infers_legacy_split() {
        let time = test_time(2024, 1, 15);
        let mut loan = base_loan(&time);
        let feb = Utc.with_ymd_and_hms(2024, 2, 15, 10, 0, 0).unwrap();

        loan.history.push(PaymentRecord::receipt(
            feb,
            RecordKind::Installment,
            Money::from_major(100),
            Money::from_major(62),
        ));
        // legacy record with no split: kind decides
        loan.history.push(PaymentRecord {
            date: feb,
            amount: Money::from_major(50),
            capital_paid: Money::ZERO,
            interest_paid: Money::ZERO,
            kind: RecordKind::Interest,
            note: None,
        });

        let totals = loan.paid_totals();
        assert_eq!(totals.capital, Money::from_major(100));
        assert_eq!(totals.interest, Money::from_major(112));
    }

    #[test]
    fn test_profit_projection() {
        let time = test_time(2024, 1, 15);
        let mut loan = base_loan(&time);

        // price: receivable minus principal
        let expected = Money::from_str_exact("627.50").unwrap();
        assert_eq!(loan.profit_projection(), expected);

        // stored positive projection wins
        loan.projected_profit = Some(Money::from_major(700));
        assert_eq!(loan.profit_projection(), Money::from_major(700));

        // simple: every coupon is profit
        loan.projected_profit = None;
        loan.interest_type = InterestMethod::Simple;
        loan.installment_value = Money::from_major(100);
        loan.installments = 12;
        assert_eq!(loan.profit_projection(), Money::from_major(1_200));
    }

    #[test]
    fn test_wire_round_trip() {
        let time = test_time(2024, 1, 15);
        let mut loan = base_loan(&time);
        loan.fine_rate = Some(Rate::ZERO);
        loan.agreement_value = Money::from_major(30);

        let json = serde_json::to_string(&loan).unwrap();
        assert!(json.contains("\"interestRate\""));
        assert!(json.contains("\"installmentValue\""));
        assert!(json.contains("\"interestType\":\"PRICE\""));
        assert!(json.contains("\"frequency\":\"MENSAL\""));
        assert!(json.contains("\"status\":\"Em Dia\""));
        assert!(json.contains("\"moraInterestRate\""));

        let back: Loan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loan);
        // explicit zero survives the round trip distinct from absent
        assert_eq!(back.fine_rate, Some(Rate::ZERO));
        assert_eq!(back.mora_rate, None);
    }
}
