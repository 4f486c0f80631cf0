//! Runtime configuration of the dashboard.
//!
//! Defaults are compiled in; a deployment may override any field by
//! defining `window.APP_CONFIG` before the wasm bundle loads:
//!
//! ```js
//! window.APP_CONFIG = { api_base: "/api/v1", unauthorized_policy: "redirect" };
//! ```

use leptos::prelude::*;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

const MIN_INTERVAL_MS: u32 = 500;

/// What the request helper does after a 401, once the session is cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnauthorizedPolicy {
    #[default]
    Reload,
    Redirect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base path of the REST API, e.g. "/api/v1"
    pub api_base: String,
    pub distribution_poll_ms: u32,
    pub receipt_poll_ms: u32,
    pub simulator_tick_ms: u32,
    pub unauthorized_policy: UnauthorizedPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/v1".to_string(),
            distribution_poll_ms: 5_000,
            receipt_poll_ms: 10_000,
            simulator_tick_ms: 3_000,
            unauthorized_policy: UnauthorizedPolicy::Reload,
        }
    }
}

impl AppConfig {
    /// Trailing slashes dropped from the base path, intervals floored.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.api_base.trim().trim_end_matches('/');
        self.api_base = trimmed.to_string();
        self.distribution_poll_ms = self.distribution_poll_ms.max(MIN_INTERVAL_MS);
        self.receipt_poll_ms = self.receipt_poll_ms.max(MIN_INTERVAL_MS);
        self.simulator_tick_ms = self.simulator_tick_ms.max(MIN_INTERVAL_MS);
        self
    }

    fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str("APP_CONFIG"))
            .unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            log::debug!("APP_CONFIG not set, using defaults");
            return Self::default();
        }
        match serde_wasm_bindgen::from_value::<AppConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(e) => {
                log::warn!("Ignoring malformed APP_CONFIG: {}", e);
                Self::default()
            }
        }
    }
}

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

/// Global configuration, read from the window on first access.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_window)
}

/// Configuration provided through context by `App`
pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_else(|| app_config().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"api_base": "/backend/api/v1/", "unauthorized_policy": "redirect"}"#)
                .unwrap();
        let config = config.normalized();
        assert_eq!(config.api_base, "/backend/api/v1");
        assert_eq!(config.unauthorized_policy, UnauthorizedPolicy::Redirect);
        assert_eq!(config.distribution_poll_ms, 5_000);
    }

    #[test]
    fn test_intervals_are_floored() {
        let config = AppConfig {
            simulator_tick_ms: 0,
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(config.simulator_tick_ms, MIN_INTERVAL_MS);
    }

    #[test]
    fn test_absolute_base_kept() {
        let config = AppConfig {
            api_base: "https://erp.example.vn/api/v1/".into(),
            ..AppConfig::default()
        }
        .normalized();
        assert_eq!(config.api_base, "https://erp.example.vn/api/v1");
    }
}
