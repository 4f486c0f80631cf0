//! Верхняя панель: переключатель сайдбара, пользователь и выход.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::PROFILE;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let notifications = use_notifications();
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        spawn_local(async move {
            if let Err(e) = do_logout(set_auth_state).await {
                notifications.error(e);
            }
            // Tabs of the previous user must not survive into the next session
            ctx.reset();
        });
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    let user_name = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| "Khách".to_string())
        })
    };
    let user_role = move || {
        auth_state.with(|s| {
            s.user_info
                .as_ref()
                .and_then(|u| u.account_role)
                .map(|r| r.label())
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ẩn menu" } else { "Hiện menu" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Agency"</span>
            </div>

            <div class="top-header__actions">
                <div
                    class="top-header__user"
                    title="Hồ sơ"
                    on:click=move |_| ctx.open_tab(PROFILE, &tab_label_for_key(PROFILE))
                >
                    {icon("user")}
                    <span>{user_name}</span>
                    {move || user_role().map(|role| view! {
                        <span class="top-header__role">{role}</span>
                    })}
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Đăng xuất">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
