//! Classification of structured error payloads returned by the REST backend.
//!
//! The backend relays business-rule failures in three shapes:
//! `{"code": "...", ...}`, `{"detail": "..."}` (or `{"error": "..."}`) and a
//! DRF-style map of field name to a list of messages.

use serde_json::Value;
use thiserror::Error;

use crate::domain::common::parse_amount;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("{}", insufficient_stock_message(.item_name.as_deref(), .available, .requested))]
    InsufficientStock {
        item_name: Option<String>,
        available: Option<f64>,
        requested: Option<f64>,
    },
    #[error("{}", debt_limit_message(.current_debt, .debt_limit))]
    DebtLimitExceeded {
        current_debt: Option<f64>,
        debt_limit: Option<f64>,
    },
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{0}")]
    Detail(String),
    #[error("Có lỗi xảy ra. Vui lòng thử lại.")]
    Unknown,
}

impl BackendError {
    /// Classifies a parsed JSON body.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return match value.as_str() {
                Some(s) if !s.trim().is_empty() => BackendError::Detail(s.trim().to_string()),
                _ => BackendError::Unknown,
            };
        };

        if let Some(code) = map.get("code").and_then(Value::as_str) {
            match code.to_ascii_uppercase().as_str() {
                "INSUFFICIENT_STOCK" => {
                    return BackendError::InsufficientStock {
                        item_name: map
                            .get("item_name")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                        available: number_field(value, "available"),
                        requested: number_field(value, "requested"),
                    }
                }
                "DEBT_LIMIT_EXCEEDED" => {
                    return BackendError::DebtLimitExceeded {
                        current_debt: number_field(value, "current_debt"),
                        debt_limit: number_field(value, "debt_limit"),
                    }
                }
                _ => {}
            }
        }

        for key in ["detail", "error", "message"] {
            if let Some(text) = map.get(key).and_then(Value::as_str) {
                if !text.trim().is_empty() {
                    return BackendError::Detail(text.trim().to_string());
                }
            }
        }

        let messages = flatten_messages(value);
        if messages.is_empty() {
            BackendError::Unknown
        } else {
            BackendError::Validation(messages)
        }
    }

    /// Classifies a raw response body; non-JSON text becomes `Detail`.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) if !body.trim().is_empty() && body.len() < 300 => {
                BackendError::Detail(body.trim().to_string())
            }
            Err(_) => BackendError::Unknown,
        }
    }

    /// Message list for forms that render errors as bullet points
    pub fn messages(&self) -> Vec<String> {
        match self {
            BackendError::Validation(list) => list.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Collects every string found in a field → messages map, in key order.
pub fn flatten_messages(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect(value, &mut out);
    out
}

fn collect(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
        Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect(v, out)),
        _ => {}
    }
}

fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(parse_amount(s)),
        _ => None,
    }
}

fn insufficient_stock_message(
    item_name: Option<&str>,
    available: &Option<f64>,
    requested: &Option<f64>,
) -> String {
    let item = item_name.unwrap_or("Sản phẩm");
    match (available, requested) {
        (Some(a), Some(r)) => format!("{item} không đủ tồn kho: còn {a}, yêu cầu {r}"),
        (Some(a), None) => format!("{item} không đủ tồn kho: còn {a}"),
        _ => format!("{item} không đủ tồn kho"),
    }
}

fn debt_limit_message(current_debt: &Option<f64>, debt_limit: &Option<f64>) -> String {
    match (current_debt, debt_limit) {
        (Some(d), Some(l)) => format!(
            "Vượt hạn mức công nợ: nợ hiện tại {}, hạn mức {}",
            crate::domain::common::amount_to_wire(*d),
            crate::domain::common::amount_to_wire(*l)
        ),
        _ => "Vượt hạn mức công nợ của đại lý".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insufficient_stock() {
        let err = BackendError::from_value(&json!({
            "code": "INSUFFICIENT_STOCK", "item_name": "Gạo", "available": 5, "requested": "8"
        }));
        assert_eq!(
            err,
            BackendError::InsufficientStock {
                item_name: Some("Gạo".into()),
                available: Some(5.0),
                requested: Some(8.0),
            }
        );
        assert_eq!(err.to_string(), "Gạo không đủ tồn kho: còn 5, yêu cầu 8");
    }

    #[test]
    fn test_debt_limit_exceeded() {
        let err = BackendError::from_body(
            r#"{"code":"debt_limit_exceeded","current_debt":"900000.00","debt_limit":1000000}"#,
        );
        assert!(matches!(err, BackendError::DebtLimitExceeded { .. }));
        assert!(err.to_string().contains("900000.00"));
    }

    #[test]
    fn test_detail_and_error_keys() {
        assert_eq!(
            BackendError::from_value(&json!({"detail": "Không tìm thấy."})),
            BackendError::Detail("Không tìm thấy.".into())
        );
        assert_eq!(
            BackendError::from_value(&json!({"error": "Sai mật khẩu"})),
            BackendError::Detail("Sai mật khẩu".into())
        );
    }

    #[test]
    fn test_field_map_flattened() {
        let err = BackendError::from_value(&json!({
            "username": ["Tên đăng nhập đã tồn tại."],
            "email": ["Email không hợp lệ.", "Email đã được dùng."]
        }));
        match err {
            BackendError::Validation(messages) => assert_eq!(messages.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_code_falls_through_to_detail() {
        let err = BackendError::from_value(&json!({"code": "OTHER", "detail": "x"}));
        assert_eq!(err, BackendError::Detail("x".into()));
    }

    #[test]
    fn test_empty_payloads_are_unknown() {
        assert_eq!(BackendError::from_value(&json!({})), BackendError::Unknown);
        assert_eq!(BackendError::from_body(""), BackendError::Unknown);
        assert_eq!(
            BackendError::from_body("Bad Gateway"),
            BackendError::Detail("Bad Gateway".into())
        );
    }
}
