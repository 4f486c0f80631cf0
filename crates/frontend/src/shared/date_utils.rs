/// Date helpers for the Vietnamese UI.
///
/// The backend speaks ISO dates ("2024-03-15", "2024-03-15T14:02:26Z");
/// the UI shows DD/MM/YYYY.
use chrono::{Local, NaiveDate};

/// "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let date = format_date(date_part);
        if date != date_part {
            let time: String = time_part.chars().take(5).collect();
            return format!("{} {}", date, time);
        }
    }
    datetime_str.to_string()
}

/// "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Optional timestamp, "-" when absent
pub fn format_opt_datetime(value: Option<&str>) -> String {
    value
        .filter(|s| !s.is_empty())
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}

/// Today in the browser's timezone, ISO format for `<input type="date">`
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// First day of the month `months_back` months before today
pub fn month_start_iso(months_back: u32) -> String {
    let today = Local::now().date_naive();
    let start = today
        .checked_sub_months(chrono::Months::new(months_back))
        .unwrap_or(today);
    format!("{}-01", start.format("%Y-%m"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("2024-13-40"), "2024-13-40");
        assert_eq!(format_opt_datetime(None), "-");
        assert_eq!(format_opt_datetime(Some("")), "-");
    }

    #[test]
    fn test_month_start_shape() {
        let s = month_start_iso(3);
        assert_eq!(s.len(), 10);
        assert!(s.ends_with("-01"));
    }
}
