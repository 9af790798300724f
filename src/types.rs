use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan contract
pub type LoanId = Uuid;

/// loan status as stored by the backend
///
/// `Overdue` may be stale on the wire; derive the live value with
/// [`crate::loan::Loan::real_status`] before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// payments up to date
    #[serde(rename = "Em Dia")]
    Current,
    /// next due date is in the past
    #[serde(rename = "Atrasado")]
    Overdue,
    /// fully settled
    #[serde(rename = "Pago")]
    Paid,
    /// renegotiated after default; surcharge applies
    #[serde(rename = "Acordo")]
    Agreement,
}

/// interest regime of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestMethod {
    /// interest-only coupon each period, principal settled at the end
    #[serde(rename = "SIMPLE")]
    Simple,
    /// french amortization, fixed installment with declining interest portion
    #[serde(rename = "PRICE")]
    Price,
}

/// payment cadence; the term is always expressed in month-equivalent periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    #[serde(rename = "MENSAL")]
    Monthly,
    #[serde(rename = "SEMANAL")]
    Weekly,
    #[serde(rename = "DIARIO")]
    Daily,
}

/// classification of a history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// initial disbursement; seeds time zero, excluded from replay
    #[serde(rename = "Abertura")]
    Opening,
    /// extra principal reduction
    #[serde(rename = "Amortização")]
    Amortization,
    /// interest-only receipt
    #[serde(rename = "Juros")]
    Interest,
    /// regular installment receipt
    #[serde(rename = "Parcela")]
    Installment,
    /// agreement surcharge receipt
    #[serde(rename = "Acordo")]
    Agreement,
}

impl RecordKind {
    /// whether the record participates in balance replay and paid-total sums
    pub fn is_financial(&self) -> bool {
        !matches!(self, RecordKind::Opening)
    }
}

/// one entry in a loan's payment history
///
/// `date` is the timestamp of the economic event, not the entry time. The
/// boundary normalizes local date-time strings to UTC before building records.
/// `capital_paid` and `interest_paid` may not sum to `amount` for
/// non-financial kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub date: DateTime<Utc>,
    pub amount: Money,
    #[serde(default)]
    pub capital_paid: Money,
    #[serde(default)]
    pub interest_paid: Money,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default)]
    pub note: Option<String>,
}

impl PaymentRecord {
    /// opening disbursement record
    pub fn opening(date: DateTime<Utc>, amount: Money) -> Self {
        Self {
            date,
            amount,
            capital_paid: Money::ZERO,
            interest_paid: Money::ZERO,
            kind: RecordKind::Opening,
            note: Some("Empréstimo Concedido".to_string()),
        }
    }

    /// receipt with an explicit capital/interest split
    pub fn receipt(
        date: DateTime<Utc>,
        kind: RecordKind,
        capital_paid: Money,
        interest_paid: Money,
    ) -> Self {
        Self {
            date,
            amount: capital_paid + interest_paid,
            capital_paid,
            interest_paid,
            kind,
            note: None,
        }
    }
}

/// interest/capital received within the current billing cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleTotals {
    pub interest: Money,
    pub capital: Money,
}

/// accumulators recomputed from history
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaidTotals {
    pub capital: Money,
    pub interest: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_kind_wire_names() {
        let json = serde_json::to_string(&RecordKind::Opening).unwrap();
        assert_eq!(json, "\"Abertura\"");

        let kind: RecordKind = serde_json::from_str("\"Juros\"").unwrap();
        assert_eq!(kind, RecordKind::Interest);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&LoanStatus::Current).unwrap(), "\"Em Dia\"");
        assert_eq!(serde_json::to_string(&LoanStatus::Overdue).unwrap(), "\"Atrasado\"");
        assert_eq!(serde_json::to_string(&LoanStatus::Paid).unwrap(), "\"Pago\"");
        assert_eq!(serde_json::to_string(&LoanStatus::Agreement).unwrap(), "\"Acordo\"");
    }

    #[test]
    fn test_only_opening_is_non_financial() {
        assert!(!RecordKind::Opening.is_financial());
        assert!(RecordKind::Amortization.is_financial());
        assert!(RecordKind::Interest.is_financial());
        assert!(RecordKind::Installment.is_financial());
        assert!(RecordKind::Agreement.is_financial());
    }

    #[test]
    fn test_receipt_amount_is_split_sum() {
        let date = Utc.with_ymd_and_hms(2024, 3, 10, 14, 0, 0).unwrap();
        let r = PaymentRecord::receipt(
            date,
            RecordKind::Installment,
            Money::from_major(550),
            Money::from_major(50),
        );
        assert_eq!(r.amount, Money::from_major(600));
    }
}
