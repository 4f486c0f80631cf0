use serde::{Deserialize, Serialize};

use crate::shared::validation::ValidationErrors;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            !self.username.trim().is_empty(),
            "username",
            "Tên đăng nhập không được để trống",
        );
        errors.check(
            !self.password.is_empty(),
            "password",
            "Mật khẩu không được để trống",
        );
        errors.into_result()
    }
}

/// Session is carried by the cookie; the body only describes the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub account_role: Option<AccountRole>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    pub fn is_admin(&self) -> bool {
        self.account_role == Some(AccountRole::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Admin,
    Staff,
    Agent,
}

impl AccountRole {
    pub const ALL: [AccountRole; 3] = [AccountRole::Admin, AccountRole::Staff, AccountRole::Agent];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Staff => "staff",
            AccountRole::Agent => "agent",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountRole::Admin => "Quản trị viên",
            AccountRole::Staff => "Nhân viên",
            AccountRole::Agent => "Đại lý",
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Register form as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
    pub account_role: String,
}

/// Body of `POST /auth/register/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub account_role: AccountRole,
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Loose `local@domain.tld` shape check
pub fn is_email_like(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            !self.full_name.trim().is_empty(),
            "full_name",
            "Vui lòng nhập họ tên",
        );
        errors.check(
            !self.username.trim().is_empty(),
            "username",
            "Vui lòng nhập tên đăng nhập",
        );

        if self.email.trim().is_empty() {
            errors.push("email", "Vui lòng nhập email");
        } else {
            errors.check(is_email_like(&self.email), "email", "Email không hợp lệ");
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push("phone", "Vui lòng nhập số điện thoại");
        } else {
            errors.check(
                phone.chars().all(|c| c.is_ascii_digit()),
                "phone",
                "Số điện thoại không hợp lệ",
            );
        }

        errors.check(
            !self.address.trim().is_empty(),
            "address",
            "Vui lòng nhập địa chỉ",
        );

        if let Some(message) = password_problem(&self.password) {
            errors.push("password", message);
        }

        if self.confirm_password.is_empty() {
            errors.push("confirm_password", "Vui lòng xác nhận mật khẩu");
        } else {
            errors.check(
                self.confirm_password == self.password,
                "confirm_password",
                "Mật khẩu xác nhận không khớp",
            );
        }

        let role = AccountRole::from_code(self.account_role.trim());
        errors.check(role.is_some(), "account_role", "Vui lòng chọn vai trò");

        match (errors.into_result(), role) {
            (Ok(()), Some(account_role)) => Ok(RegisterRequest {
                username: self.username.trim().to_string(),
                password: self.password.clone(),
                confirm_password: self.confirm_password.clone(),
                full_name: self.full_name.trim().to_string(),
                email: self.email.trim().to_string(),
                phone_number: phone.to_string(),
                address: self.address.trim().to_string(),
                account_role,
            }),
            (Err(errors), _) => Err(errors),
            (Ok(()), None) => Err(ValidationErrors::new()),
        }
    }
}

/// First failed password rule, in the order the form reports them
fn password_problem(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Vui lòng nhập mật khẩu")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Mật khẩu phải có ít nhất 8 ký tự")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Mật khẩu phải có ít nhất 1 chữ hoa")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Mật khẩu phải có ít nhất 1 chữ thường")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Mật khẩu phải có ít nhất 1 số")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            full_name: "Nguyễn Văn A".into(),
            username: "nva".into(),
            email: "nva@example.com".into(),
            phone: "0901234567".into(),
            address: "1 Lê Duẩn".into(),
            password: "Secret123".into(),
            confirm_password: "Secret123".into(),
            account_role: "staff".into(),
        }
    }

    #[test]
    fn test_valid_form_builds_request() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.account_role, AccountRole::Staff);
        assert_eq!(request.phone_number, "0901234567");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["account_role"], "staff");
        assert_eq!(json["confirm_password"], "Secret123");
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(password_problem("Ab1"), Some("Mật khẩu phải có ít nhất 8 ký tự"));
        assert_eq!(password_problem("abcdefg1"), Some("Mật khẩu phải có ít nhất 1 chữ hoa"));
        assert_eq!(password_problem("ABCDEFG1"), Some("Mật khẩu phải có ít nhất 1 chữ thường"));
        assert_eq!(password_problem("Abcdefgh"), Some("Mật khẩu phải có ít nhất 1 số"));
        assert_eq!(password_problem("Abcdefg1"), None);
    }

    #[test]
    fn test_every_invalid_field_reported() {
        let form = RegisterForm {
            email: "not-an-email".into(),
            phone: "09 01".into(),
            confirm_password: "Other123".into(),
            account_role: "owner".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        for field in ["email", "phone", "confirm_password", "account_role"] {
            assert!(errors.for_field(field).is_some(), "missing error for {field}");
        }
        assert!(errors.for_field("password").is_none());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_email_like("a@b.vn"));
        assert!(!is_email_like("a@b"));
        assert!(!is_email_like("@b.vn"));
        assert!(!is_email_like("a b@c.vn"));
        assert!(!is_email_like("a@@b.vn"));
        assert!(!is_email_like("a@b..c"));
        assert!(!is_email_like("a@.b.vn"));
        assert!(!is_email_like("a@b.vn."));
        assert!(is_email_like("nva@mail.example.com.vn"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginRequest::default().validate().unwrap_err();
        assert_eq!(errors.errors.len(), 2);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user: UserInfo =
            serde_json::from_str(r#"{"id": 1, "username": "admin", "full_name": ""}"#).unwrap();
        assert_eq!(user.display_name(), "admin");
        assert!(!user.is_admin());
    }
}
