pub mod balance;
pub mod breakdown;
pub mod decimal;
pub mod errors;
pub mod format;
pub mod loan;
pub mod penalty;
pub mod portfolio;
pub mod simulation;
pub mod types;

// re-export key types
pub use balance::{LedgerEngine, LedgerEntry, DAYS_PER_MONTH};
pub use breakdown::InstallmentBreakdown;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use format::{format_date, format_money, format_money_opt};
pub use loan::Loan;
pub use penalty::{OverdueCalculator, OverdueDefaults};
pub use portfolio::{summarize, PortfolioSummary};
pub use simulation::{simulate, Simulation, SimulationRequest, SimulationResult};
pub use types::{
    CycleTotals, InterestMethod, LoanId, LoanStatus, PaidTotals, PaymentFrequency,
    PaymentRecord, RecordKind,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
