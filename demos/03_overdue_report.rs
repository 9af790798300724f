/// overdue report - rank delinquent contracts by updated amount owed
use chrono::{NaiveDate, TimeZone, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use loan_ledger_rs::{
    format_date, format_money, summarize, InterestMethod, Loan, LoanStatus, Money,
    OverdueCalculator, PaymentFrequency, Rate,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc
        .with_ymd_and_hms(2024, 3, 15, 9, 0, 0)
        .single()
        .ok_or("bad date")?;
    let time = SafeTimeProvider::new(TimeSource::Test(now));
    let calculator = OverdueCalculator::new();

    let mut book = Vec::new();
    for (client, due, fine) in [
        ("Maria Souza", NaiveDate::from_ymd_opt(2024, 3, 5), None),
        ("Carlos Dias", NaiveDate::from_ymd_opt(2024, 2, 20), None),
        // penalty waived by the operator: explicit zero, not absent
        ("Ana Castro", NaiveDate::from_ymd_opt(2024, 3, 1), Some(Rate::ZERO)),
    ] {
        let mut loan = Loan::open(
            client,
            Money::from_major(1_000),
            Rate::from_percent(dec!(5)),
            10,
            Money::from_major(130),
            InterestMethod::Price,
            PaymentFrequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
            due.ok_or("bad date")?,
            &time,
        );
        loan.fine_rate = fine;
        loan.mora_rate = fine;
        book.push(loan);
    }

    for loan in &book {
        if loan.real_status(&time) != LoanStatus::Overdue {
            continue;
        }
        println!(
            "{:<12} due {}  {:>3} days late  owed R$ {}",
            loan.client,
            format_date(loan.next_due),
            calculator.days_overdue(loan.next_due, &time),
            format_money(calculator.for_loan(loan, &time)),
        );
    }

    let summary = summarize(&book, &calculator, &time);
    println!("total overdue: R$ {}", format_money(summary.overdue_total));
    Ok(())
}
