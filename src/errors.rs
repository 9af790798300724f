use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid term: {installments} installments")]
    InvalidTerm {
        installments: u32,
    },

    #[error("invalid installment value: {amount}")]
    InvalidInstallmentValue {
        amount: Money,
    },

    #[error("negative record amount {amount} at {date}")]
    NegativeRecordAmount {
        amount: Money,
        date: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
