//! Денежные значения приходят от бэкенда как десятичные строки ("1500000.00").

use serde::{Deserialize, Deserializer};

/// Parse a decimal string from the backend; malformed values count as zero.
pub fn parse_amount(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

/// Serialize an amount the way the backend expects decimal fields.
pub fn amount_to_wire(value: f64) -> String {
    format!("{:.2}", value)
}

/// Accepts either a JSON number or a decimal string.
pub fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n,
        Raw::Str(s) => parse_amount(&s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "de_amount")]
        value: f64,
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500000.00"), 1_500_000.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount("abc"), 0.0);
    }

    #[test]
    fn test_de_amount_accepts_string_and_number() {
        let a: Holder = serde_json::from_str(r#"{"value": "250.50"}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"value": 250.5}"#).unwrap();
        assert_eq!(a.value, b.value);
    }

    #[test]
    fn test_amount_to_wire() {
        assert_eq!(amount_to_wire(1000.0), "1000.00");
    }
}
