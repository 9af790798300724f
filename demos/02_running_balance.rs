/// running balance - replay a payment history under controlled time
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use loan_ledger_rs::{
    format_money, InstallmentBreakdown, InterestMethod, LedgerEngine, Loan, Money,
    PaymentFrequency, PaymentRecord, Rate, RecordKind,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .ok_or("bad start")?;
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let control = time.test_control().ok_or("test control unavailable")?;

    let mut loan = Loan::open(
        "Carlos Dias",
        Money::from_major(1_000),
        Rate::from_percent(dec!(3)),
        10,
        Money::from_major(130),
        InterestMethod::Price,
        PaymentFrequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
        NaiveDate::from_ymd_opt(2024, 2, 1).ok_or("bad date")?,
        &time,
    );

    let engine = LedgerEngine::new();

    // thirty days in, the operator records an installment receipt
    control.advance(Duration::days(30));
    let split = InstallmentBreakdown::for_loan(&loan, engine.current_balance(&loan, &time));
    println!(
        "expected split: interest R$ {} / capital R$ {}",
        format_money(split.interest),
        format_money(split.capital)
    );

    loan.history.push(PaymentRecord::receipt(
        time.now(),
        RecordKind::Installment,
        split.capital,
        split.interest,
    ));

    // another month passes with no payment
    control.advance(Duration::days(30));

    for entry in engine.statement(&loan, &time) {
        println!(
            "{}  +{} days  interest R$ {}  payment R$ {}  balance R$ {}",
            entry.date.format("%d/%m/%Y"),
            entry.days_accrued,
            format_money(entry.interest_accrued),
            format_money(entry.payment),
            format_money(entry.balance),
        );
    }

    println!(
        "owed right now: R$ {}",
        format_money(engine.current_balance(&loan, &time))
    );
    Ok(())
}
