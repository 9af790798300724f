use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::InterestMethod;

/// raw origination-form inputs; fields are optional because the form fills in
/// piecemeal and the simulation must not fire until everything is present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub principal: Option<Money>,
    /// monthly rate
    pub rate: Option<Rate>,
    /// term in month-equivalent periods, regardless of payment frequency
    pub term_months: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub method: Option<InterestMethod>,
}

/// fixed installment and totals for a prospective contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub installment: Money,
    pub total_interest: Money,
    pub total_payable: Money,
}

/// outcome of a simulation pass
///
/// incomplete or non-positive inputs are a normal state during form entry,
/// reported as `Pending` so the caller renders a waiting placeholder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Simulation {
    Pending,
    Ready(SimulationResult),
}

impl Simulation {
    pub fn is_ready(&self) -> bool {
        matches!(self, Simulation::Ready(_))
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        match self {
            Simulation::Ready(r) => Some(r),
            Simulation::Pending => None,
        }
    }
}

/// simulate the fixed installment and totals for the requested terms
pub fn simulate(request: &SimulationRequest) -> Simulation {
    let (principal, rate, term, method) = match (
        request.principal,
        request.rate,
        request.term_months,
        request.start_date,
        request.method,
    ) {
        (Some(p), Some(r), Some(n), Some(_), Some(m)) => (p, r, n, m),
        _ => return Simulation::Pending,
    };

    if !principal.is_positive() || rate.is_negative() || term == 0 {
        return Simulation::Pending;
    }

    let n = Decimal::from(term);
    let result = match method {
        InterestMethod::Simple => {
            // interest-only coupon each period; principal returned at term
            let installment = principal * rate.as_decimal();
            let total_interest = installment * n;
            SimulationResult {
                installment,
                total_interest,
                total_payable: total_interest + principal,
            }
        }
        InterestMethod::Price => {
            let installment = price_installment(principal, rate, term);
            let total_payable = installment * n;
            SimulationResult {
                installment,
                total_interest: total_payable - principal,
                total_payable,
            }
        }
    };

    Simulation::Ready(result)
}

/// french amortization installment: P * i(1+i)^n / ((1+i)^n - 1)
fn price_installment(principal: Money, monthly_rate: Rate, term_months: u32) -> Money {
    let i = monthly_rate.as_decimal();

    if i.is_zero() {
        // degenerate zero-rate contract: straight division, no interest
        return principal / Decimal::from(term_months);
    }

    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + i;
    for _ in 0..term_months {
        compound *= base;
    }

    let numerator = principal.as_decimal() * i * compound;
    let denominator = compound - Decimal::ONE;

    Money::from_decimal(numerator / denominator)
}
