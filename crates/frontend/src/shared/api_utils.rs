//! HTTP helpers shared by every resource client.
//!
//! All requests go to the configured API base with cookies attached. A 401
//! clears the session through the registered hook and then applies the
//! configured [`UnauthorizedPolicy`].

use std::cell::RefCell;
use std::rc::Rc;

use contracts::shared::api_error::BackendError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use super::config::{app_config, UnauthorizedPolicy};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Không thể kết nối tới máy chủ: {0}")]
    Network(String),
    #[error("Phiên đăng nhập đã hết hạn, vui lòng đăng nhập lại")]
    Unauthorized,
    #[error("{error}")]
    Http { status: u16, error: BackendError },
    #[error("Phản hồi không hợp lệ từ máy chủ: {0}")]
    Parse(String),
    #[error("Không thể tạo yêu cầu: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// Messages for forms that list every server-side field error
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Http { error, .. } => error.messages(),
            other => vec![other.to_string()],
        }
    }
}

impl From<ApiError> for String {
    fn from(value: ApiError) -> Self {
        value.to_string()
    }
}

// Set by the auth provider; wasm is single-threaded.
thread_local! {
    static SESSION_RESET: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Registers the callback that clears the client session on a 401.
pub fn set_session_reset_hook(hook: impl Fn() + 'static) {
    SESSION_RESET.with(|slot| *slot.borrow_mut() = Some(Rc::new(hook)));
}

fn handle_unauthorized(path: &str) {
    log::warn!("401 on {}, clearing session", path);
    let hook = SESSION_RESET.with(|slot| slot.borrow().clone());
    if let Some(hook) = hook {
        hook();
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let result = match app_config().unauthorized_policy {
        UnauthorizedPolicy::Reload => location.reload(),
        UnauthorizedPolicy::Redirect => location.set_href("/"),
    };
    if let Err(e) = result {
        log::error!("Unauthorized policy failed: {:?}", e);
    }
}

/// Joins the API base with a resource path ("/agency/" → "/api/v1/agency/").
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

pub fn api_url(path: &str) -> String {
    join_url(&app_config().api_base, path)
}

/// Appends a query string; `None` fields are skipped by the DTOs themselves.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
    Ok(if qs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, qs)
    })
}

fn prepare(builder: RequestBuilder) -> RequestBuilder {
    builder
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
}

/// What a 401 means for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnUnauthorized {
    /// Session expired: reset and apply the policy
    Handle,
    /// Login and session probe: a 401 is an ordinary answer
    Report,
}

async fn check(path: &str, response: Response, on_401: OnUnauthorized) -> Result<Response, ApiError> {
    let status = response.status();
    if status == 401 {
        if on_401 == OnUnauthorized::Handle {
            handle_unauthorized(path);
            return Err(ApiError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Http {
            status,
            error: BackendError::from_body(&body),
        });
    }
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        let error = BackendError::from_body(&body);
        log::warn!("HTTP {} on {}: {}", status, path, error);
        return Err(ApiError::Http { status, error });
    }
    Ok(response)
}

async fn send(path: &str, builder: RequestBuilder, on_401: OnUnauthorized) -> Result<Response, ApiError> {
    let response = prepare(builder).send().await.map_err(|e| {
        log::error!("Request to {} failed: {}", path, e);
        ApiError::Network(e.to_string())
    })?;
    check(path, response, on_401).await
}

async fn send_json<B: Serialize>(
    path: &str,
    builder: RequestBuilder,
    body: &B,
    on_401: OnUnauthorized,
) -> Result<Response, ApiError> {
    let request = prepare(builder)
        .json(body)
        .map_err(|e| ApiError::Serialize(e.to_string()))?;
    let response = request.send().await.map_err(|e| {
        log::error!("Request to {} failed: {}", path, e);
        ApiError::Network(e.to_string())
    })?;
    check(path, response, on_401).await
}

async fn parse<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| {
        log::error!("Unexpected payload from {}: {}", path, e);
        ApiError::Parse(e.to_string())
    })
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send(path, Request::get(&api_url(path)), OnUnauthorized::Handle).await?;
    parse(path, response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send_json(path, Request::post(&api_url(path)), body, OnUnauthorized::Handle).await?;
    parse(path, response).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send_json(path, Request::put(&api_url(path)), body, OnUnauthorized::Handle).await?;
    parse(path, response).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send_json(path, Request::patch(&api_url(path)), body, OnUnauthorized::Handle).await?;
    parse(path, response).await
}

/// POST without a body whose response content is ignored
pub async fn post_empty(path: &str) -> Result<(), ApiError> {
    send(path, Request::post(&api_url(path)), OnUnauthorized::Handle).await?;
    Ok(())
}

/// GET where 401 is returned to the caller instead of ending the session
pub async fn probe_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send(path, Request::get(&api_url(path)), OnUnauthorized::Report).await?;
    parse(path, response).await
}

/// POST where 401 is returned to the caller (wrong credentials on login)
pub async fn submit_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = send_json(path, Request::post(&api_url(path)), body, OnUnauthorized::Report).await?;
    parse(path, response).await
}

/// Like [`submit_json`] but the response body is ignored
pub async fn submit(path: &str, body: &impl Serialize) -> Result<(), ApiError> {
    send_json(path, Request::post(&api_url(path)), body, OnUnauthorized::Report).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_distribution::DistributionListQuery;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/api/v1", "/agency/"), "/api/v1/agency/");
        assert_eq!(join_url("/api/v1/", "agency/5/"), "/api/v1/agency/5/");
        assert_eq!(join_url("", "/auth/me/"), "/auth/me/");
    }

    #[test]
    fn test_with_query_skips_empty() {
        let empty = DistributionListQuery::default();
        assert_eq!(with_query("/inventory/issues/", &empty).unwrap(), "/inventory/issues/");

        let query = DistributionListQuery {
            limit: Some(20),
            offset: Some(40),
            agency_id: Some(3),
            date_from: Some("2024-07-01".into()),
            date_to: None,
        };
        assert_eq!(
            with_query("/inventory/issues/", &query).unwrap(),
            "/inventory/issues/?limit=20&offset=40&agency_id=3&date_from=2024-07-01"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::Http {
            status: 400,
            error: BackendError::Validation(vec!["a".into(), "b".into()]),
        };
        assert_eq!(err.messages(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.status(), Some(400));
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        let text: String = ApiError::Parse("eof".into()).into();
        assert!(text.contains("eof"));
    }
}
