use contracts::system::auth::{LoginRequest, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api_utils::set_session_reset_hook;
use crate::system::staff;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user_info: Option<UserInfo>,
    /// Agency mapped to the user through `/staff-agency/`
    pub agency_id: Option<i64>,
    /// False until the initial `/auth/me/` probe has finished
    pub checked: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user_info.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(|u| u.is_admin()).unwrap_or(false)
    }

    fn signed_out() -> Self {
        Self {
            checked: true,
            ..Self::default()
        }
    }
}

/// Loads the staff-agency mapping in the background once a user is known.
fn resolve_agency(user_id: i64, set_auth_state: WriteSignal<AuthState>) {
    spawn_local(async move {
        let agency_id = staff::api::get_agency_for_user(user_id).await;
        set_auth_state.update(|state| {
            if state.user_info.as_ref().map(|u| u.id) == Some(user_id) {
                state.agency_id = agency_id;
            }
        });
    });
}

/// Restores the cookie session on mount and registers the 401 reset hook.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    set_session_reset_hook(move || {
        let _ = set_auth_state.try_set(AuthState::signed_out());
    });

    spawn_local(async move {
        match api::get_current_user().await {
            Ok(user_info) => {
                log::info!("Session restored for {}", user_info.username);
                let user_id = user_info.id;
                set_auth_state.set(AuthState {
                    user_info: Some(user_info),
                    agency_id: None,
                    checked: true,
                });
                resolve_agency(user_id, set_auth_state);
            }
            Err(e) => {
                log::debug!("No active session: {}", e);
                set_auth_state.set(AuthState::signed_out());
            }
        }
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    (
        expect_context::<ReadSignal<AuthState>>(),
        expect_context::<WriteSignal<AuthState>>(),
    )
}

pub async fn do_login(request: LoginRequest, set_auth_state: WriteSignal<AuthState>) -> Result<(), Vec<String>> {
    request.validate().map_err(|e| e.messages())?;
    let user_info = api::login(&request).await.map_err(|e| match e.status() {
        Some(400) | Some(401) => vec!["Tên đăng nhập hoặc mật khẩu không đúng".to_string()],
        _ => e.messages(),
    })?;
    log::info!("Logged in as {}", user_info.username);
    let user_id = user_info.id;
    set_auth_state.set(AuthState {
        user_info: Some(user_info),
        agency_id: None,
        checked: true,
    });
    resolve_agency(user_id, set_auth_state);
    Ok(())
}

/// Clears the local session even when the backend call fails
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) -> Result<(), String> {
    let result = api::logout().await.map_err(String::from);
    if let Err(e) = &result {
        log::warn!("Logout request failed: {}", e);
    }
    set_auth_state.set(AuthState::signed_out());
    result
}
