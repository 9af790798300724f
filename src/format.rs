use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::decimal::Money;

/// format a money value in pt-BR style: thousands '.', decimal ','
///
/// always two decimal places, e.g. `1.234,56`
pub fn format_money(value: Money) -> String {
    let rounded = value.round_dp(2).as_decimal();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let units = abs.trunc();
    let cents = ((abs - units) * Decimal::from(100))
        .round()
        .to_u32()
        .unwrap_or(0);

    let grouped = group_thousands(&units.normalize().to_string());
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped},{cents:02}")
}

/// format a possibly-absent money value; absent degrades to a zero display
pub fn format_money_opt(value: Option<Money>) -> String {
    format_money(value.unwrap_or(Money::ZERO))
}

/// format a calendar date as dd/mm/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_money(Money::from_str_exact("1234.56").unwrap()), "1.234,56");
        assert_eq!(format_money(Money::from_major(1_000_000)), "1.000.000,00");
        assert_eq!(format_money(Money::from_major(999)), "999,00");
    }

    #[test]
    fn test_two_decimal_places_always() {
        assert_eq!(format_money(Money::from_str_exact("0.5").unwrap()), "0,50");
        assert_eq!(format_money(Money::from_major(7)), "7,00");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_money(Money::from_str_exact("-12.3").unwrap()), "-12,30");
    }

    #[test]
    fn test_nil_inputs_render_zero() {
        assert_eq!(format_money_opt(None), "0,00");
        assert_eq!(format_money(Money::from_f64_lossy(f64::NAN)), "0,00");
        assert_eq!(format_money(Money::ZERO), "0,00");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
    }
}
