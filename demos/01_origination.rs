/// origination - simulate terms and open a contract
use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use loan_ledger_rs::{
    format_money, simulate, InterestMethod, Loan, Money, PaymentFrequency, Rate, Simulation,
    SimulationRequest,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // the form fills in piecemeal; nothing fires until it is complete
    let mut request = SimulationRequest {
        principal: Some(Money::from_major(1_000)),
        rate: Some(Rate::from_percent(dec!(10))),
        term_months: Some(10),
        start_date: None,
        method: Some(InterestMethod::Price),
    };
    assert!(matches!(simulate(&request), Simulation::Pending));

    request.start_date = NaiveDate::from_ymd_opt(2024, 1, 15);
    let result = match simulate(&request) {
        Simulation::Ready(r) => r,
        Simulation::Pending => unreachable!("request is complete"),
    };

    println!("installment:    R$ {}", format_money(result.installment));
    println!("total interest: R$ {}", format_money(result.total_interest));
    println!("total payable:  R$ {}", format_money(result.total_payable));

    // open the contract with the simulated installment
    let loan = Loan::open(
        "Maria Souza",
        Money::from_major(1_000),
        Rate::from_percent(dec!(10)),
        10,
        result.installment,
        InterestMethod::Price,
        PaymentFrequency::Monthly,
        NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("bad date")?,
        NaiveDate::from_ymd_opt(2024, 2, 15).ok_or("bad date")?,
        &time,
    );
    loan.validate()?;

    println!("{}", serde_json::to_string_pretty(&loan)?);
    Ok(())
}
