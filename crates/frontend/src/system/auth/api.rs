use contracts::system::auth::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};

use crate::shared::api_utils::{post_empty, probe_json, submit, submit_json, ApiError};

/// Logs in; the backend answers with a session cookie and the user
pub async fn login(request: &LoginRequest) -> Result<UserInfo, ApiError> {
    let response: LoginResponse = submit_json("/auth/login/", request).await?;
    Ok(response.user)
}

pub async fn logout() -> Result<(), ApiError> {
    post_empty("/auth/logout/").await
}

/// Current user from the session cookie; 401 means "not logged in"
pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    probe_json("/auth/me/").await
}

pub async fn register(request: &RegisterRequest) -> Result<(), ApiError> {
    submit("/auth/register/", request).await
}
