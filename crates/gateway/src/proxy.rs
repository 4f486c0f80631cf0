//! Reverse proxy for `/api/v1/*`: same origin for the browser, so the
//! backend's session cookie is sent with every request.

use crate::config::UpstreamConfig;
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderName, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// Request bodies above this size are refused
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// RFC 7230 §6.1; never forwarded in either direction
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("request body rejected: {0}")]
    Body(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Body(_) => StatusCode::PAYLOAD_TOO_LARGE,
        };
        tracing::error!("Proxy error ({}): {}", status.as_u16(), self);
        // `detail` is what the dashboard shows for non-field errors
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyState {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // Redirects go back to the browser untouched, with their cookies
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Names listed in the `Connection` header are hop-by-hop too
fn connection_tokens(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// End-to-end headers only. `Host` and `Content-Length` are dropped as well;
/// the client sets them for the new connection and body.
pub fn filter_headers(headers: &HeaderMap) -> HeaderMap {
    let extra = connection_tokens(headers);
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name)
            || name == header::HOST
            || name == header::CONTENT_LENGTH
            || extra.iter().any(|t| t == name.as_str())
        {
            continue;
        }
        // append keeps repeated headers such as Set-Cookie
        out.append(name.clone(), value.clone());
    }
    out
}

/// Upstream URL with the incoming path and query unchanged
pub fn upstream_url(base_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("{}{}", base_url.trim_end_matches('/'), path_and_query)
}

pub async fn forward(State(state): State<ProxyState>, req: Request) -> Result<Response, ProxyError> {
    let (parts, body) = req.into_parts();
    let url = upstream_url(&state.base_url, &parts.uri);
    let body = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::debug!("{} {} -> {}", parts.method, parts.uri.path(), url);

    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(filter_headers(&parts.headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = filter_headers(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_filter_headers_drops_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, x-trace"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert("x-trace", HeaderValue::from_static("1"));
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionid=abc"));

        let filtered = filter_headers(&headers);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.get(header::COOKIE).unwrap(), "sessionid=abc");
        assert_eq!(filtered.get(header::CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_filter_headers_keeps_every_set_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("sessionid=abc; HttpOnly"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("csrftoken=xyz"));

        let filtered = filter_headers(&headers);
        assert_eq!(filtered.get_all(header::SET_COOKIE).iter().count(), 2);
    }

    #[test]
    fn test_upstream_url_keeps_path_and_query() {
        let uri: Uri = "/api/v1/inventory/issues/?limit=20&offset=40".parse().unwrap();
        assert_eq!(
            upstream_url("http://127.0.0.1:8000/", &uri),
            "http://127.0.0.1:8000/api/v1/inventory/issues/?limit=20&offset=40"
        );
    }

    #[test]
    fn test_upstream_url_without_query() {
        let uri: Uri = "/api/v1/auth/me/".parse().unwrap();
        assert_eq!(
            upstream_url("https://backend.local", &uri),
            "https://backend.local/api/v1/auth/me/"
        );
    }

    #[test]
    fn test_rejected_body_maps_to_payload_too_large() {
        let response = ProxyError::Body("too large".into()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
