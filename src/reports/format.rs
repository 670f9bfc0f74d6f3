//! Display formatting shared by report titles and exports

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// `Jan 15, 2023`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Dec 26, 2024, 2:25 PM`
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Dollar amount with thousands separators and at most three fraction
/// digits: `$1,500`, `$1,234.5`
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(3).normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("${}{}.{}", sign, grouped, fraction),
        None => format!("${}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2023");
        let date = NaiveDate::from_ymd_opt(2024, 12, 26).unwrap();
        assert_eq!(format_date(date), "Dec 26, 2024");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::from(800)), "$800");
        assert_eq!(format_money(Decimal::from(1500)), "$1,500");
        assert_eq!(format_money(Decimal::from(1_234_567)), "$1,234,567");
        assert_eq!(format_money(Decimal::from_str("1200.50").unwrap()), "$1,200.5");
        assert_eq!(format_money(Decimal::from_str("0.1234").unwrap()), "$0.123");
        assert_eq!(format_money(Decimal::ZERO), "$0");
    }
}
