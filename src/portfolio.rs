use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::Loan;
use crate::penalty::OverdueCalculator;
use crate::types::LoanStatus;

/// headline figures for the billing dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// inflated amounts owed across delinquent contracts
    pub overdue_total: Money,
    /// cumulative interest received across the whole book
    pub interest_received: Money,
    /// installments falling due today
    pub due_today: Money,
}

/// summarize a loan book as of now
///
/// delinquency is judged on the live due date, not the stored status, and
/// each contract's own penalty terms are passed through as-is so waived
/// (zero) rates stay waived
pub fn summarize(
    loans: &[Loan],
    calculator: &OverdueCalculator,
    time: &SafeTimeProvider,
) -> PortfolioSummary {
    let today = time.now().date_naive();
    let mut summary = PortfolioSummary::default();

    for loan in loans {
        summary.interest_received += loan.total_paid_interest;

        if loan.status == LoanStatus::Paid {
            continue;
        }
        if loan.real_status(time) == LoanStatus::Overdue {
            summary.overdue_total += calculator.for_loan(loan, time);
        }
        if loan.next_due == today {
            summary.due_today += loan.installment_value;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::{InterestMethod, PaymentFrequency};
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn frozen(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        ))
    }

    fn loan(next_due: NaiveDate, status: LoanStatus) -> Loan {
        Loan {
            id: Uuid::new_v4(),
            client: "Pedro Nunes".to_string(),
            amount: Money::from_major(1_000),
            interest_rate: Rate::from_percent(dec!(5)),
            installments: 10,
            installment_value: Money::from_major(130),
            interest_type: InterestMethod::Price,
            frequency: PaymentFrequency::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            next_due,
            status,
            fine_rate: None,
            mora_rate: None,
            total_paid_capital: Money::ZERO,
            total_paid_interest: Money::from_major(40),
            agreement_value: Money::ZERO,
            projected_profit: None,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_summary_buckets() {
        let time = frozen(2024, 3, 15);
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();

        let book = vec![
            loan(past, LoanStatus::Current),  // stale status, really overdue
            loan(today, LoanStatus::Current), // due today
            loan(future, LoanStatus::Current),
            loan(past, LoanStatus::Paid), // settled, only counts interest
        ];

        let summary = summarize(&book, &OverdueCalculator::new(), &time);

        // 130 + 2% fine + (1%/30)*10 days of mora
        assert_eq!(
            summary.overdue_total.round_dp(2),
            Money::from_str_exact("133.03").unwrap()
        );
        assert_eq!(summary.due_today, Money::from_major(130));
        assert_eq!(summary.interest_received, Money::from_major(160));
    }

    #[test]
    fn test_waived_penalty_stays_waived_in_summary() {
        let time = frozen(2024, 3, 15);
        let past = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let mut delinquent = loan(past, LoanStatus::Overdue);
        delinquent.fine_rate = Some(Rate::ZERO);
        delinquent.mora_rate = Some(Rate::ZERO);

        let summary = summarize(&[delinquent], &OverdueCalculator::new(), &time);
        // explicit zeros pass through; the installment is owed unchanged
        assert_eq!(summary.overdue_total, Money::from_major(130));
    }

    #[test]
    fn test_empty_book() {
        let time = frozen(2024, 3, 15);
        let summary = summarize(&[], &OverdueCalculator::new(), &time);
        assert_eq!(summary, PortfolioSummary::default());
    }
}
