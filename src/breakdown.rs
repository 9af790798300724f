use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loan::Loan;
use crate::types::InterestMethod;

/// split of one period's fixed installment into interest and capital
///
/// this is the expectation-per-installment view: "what should this period's
/// payment be split into" for the given outstanding balance. the running
/// balance engine answers a different question and the two are reconciled
/// only at the start of a cycle with no intervening payments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InstallmentBreakdown {
    pub interest: Money,
    pub capital: Money,
    /// shortfall when the fixed installment does not even cover the period's
    /// interest (negative amortization); callers must surface this
    pub deficit: Money,
}

impl InstallmentBreakdown {
    /// split a fixed installment against an outstanding balance
    pub fn split(balance: Money, monthly_rate: Rate, installment: Money) -> Self {
        let interest = balance.percentage(monthly_rate.as_percent()).max(Money::ZERO);
        let capital = (installment - interest).max(Money::ZERO);
        let deficit = (interest - installment).max(Money::ZERO);
        Self {
            interest,
            capital,
            deficit,
        }
    }

    /// split for a loan's own terms
    ///
    /// simple contracts are interest-only coupons, so the capital portion is
    /// zero until final settlement. an active agreement surcharge is added to
    /// the interest side and the total, never to capital; the deficit is
    /// judged on the financial interest alone.
    pub fn for_loan(loan: &Loan, balance: Money) -> Self {
        let mut breakdown = Self::split(balance, loan.interest_rate, loan.installment_value);

        if loan.interest_type == InterestMethod::Simple {
            breakdown.capital = Money::ZERO;
        }
        if loan.agreement_value.is_positive() {
            breakdown.interest += loan.agreement_value;
        }
        breakdown
    }

    /// total presented to the payer
    pub fn total(&self) -> Money {
        self.interest + self.capital
    }

    pub fn has_deficit(&self) -> bool {
        self.deficit.is_positive()
    }
}
