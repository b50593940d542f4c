/// Utilities for date, time and amount formatting
///
/// Provides consistent Spanish formatting across the application
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 2024-03-15 -> "15/03/2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// 2024-03-15T14:02:00 -> "15/03/2024 14:02"
pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

/// Value for `<input type="date">`
pub fn input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse the value of an `<input type="date">`; blank or malformed is `None`.
pub fn parse_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

/// "septiembre 2025"
pub fn month_title(date: NaiveDate) -> String {
    format!("{} {}", MONTHS_ES[date.month0() as usize], date.year())
}

/// 1234.5 -> "1.234,50 €"
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let int_part = cents / 100;
    let frac = cents % 100;
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    format!("{}{},{:02} €", sign, format_thousands(int_part), frac)
}

/// Group digits in threes with a dot.
pub fn format_thousands(n: i64) -> String {
    let s = n.abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date(d), "15/03/2024");
        assert_eq!(input_value(d), "2024-03-15");
        assert_eq!(parse_input(" 2024-03-15 "), Some(d));
        assert_eq!(parse_input(""), None);
        assert_eq!(format_optional_date(None), "-");
    }

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        assert_eq!(format_datetime(dt), "31/12/2024 23:59");
    }

    #[test]
    fn test_money_and_thousands() {
        assert_eq!(format_thousands(1234567), "1.234.567");
        assert_eq!(format_thousands(-1000), "-1.000");
        assert_eq!(format_money(1234.5), "1.234,50 €");
        assert_eq!(format_money(0.0), "0,00 €");
        assert_eq!(format_money(-7.25), "-7,25 €");
    }

    #[test]
    fn test_month_title() {
        let d = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(month_title(d), "septiembre 2025");
    }
}
