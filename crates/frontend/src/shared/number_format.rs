//! Number formatting for the Vietnamese UI: "." groups thousands, "," is the decimal mark.

/// Groups thousands with `.` and keeps `decimals` fractional digits.
///
/// `format_number_with_decimals(1234.5, 1)` gives `"1.234,5"`.
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let mut result: String = grouped.chars().rev().collect();

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        result.insert(0, '-');
    }
    if let Some(d) = decimal_part {
        result.push(',');
        result.push_str(d);
    }
    result
}

/// Whole-dong amount with the currency sign: "1.500.000 ₫"
pub fn format_vnd(value: f64) -> String {
    format!("{} ₫", format_number_with_decimals(value, 0))
}

pub fn format_int(value: i64) -> String {
    format_number_with_decimals(value as f64, 0)
}

/// "42,5%"
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number_with_decimals(value, 1))
}

/// Parses user input like "1.500.000" or "1500000"; None for anything else.
pub fn parse_vnd_input(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_end_matches('₫')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(1_500_000.0), "1.500.000 ₫");
        assert_eq!(format_vnd(0.0), "0 ₫");
        assert_eq!(format_vnd(-250_000.0), "-250.000 ₫");
        assert_eq!(format_vnd(999.6), "1.000 ₫");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0,00");
        assert_eq!(format_int(1234567), "1.234.567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(42.46), "42,5%");
        assert_eq!(format_percent(100.0), "100,0%");
    }

    #[test]
    fn test_parse_vnd_input() {
        assert_eq!(parse_vnd_input("1.500.000"), Some(1_500_000.0));
        assert_eq!(parse_vnd_input(" 2500000 ₫"), Some(2_500_000.0));
        assert_eq!(parse_vnd_input("12,5"), Some(12.5));
        assert_eq!(parse_vnd_input("abc"), None);
        assert_eq!(parse_vnd_input(""), None);
    }
}
