use leptos::prelude::*;

use super::context::use_auth;

/// Renders children for a signed-in user, `fallback` otherwise.
/// Nothing but a loader is shown while the session probe is running.
#[component]
pub fn RequireAuth(#[prop(into)] fallback: ViewFn, children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let checked = move || auth_state.with(|s| s.checked);
    let signed_in = move || auth_state.with(|s| s.is_authenticated());

    view! {
        <Show
            when=checked
            fallback=|| view! { <div class="app-loading">"Đang kiểm tra phiên đăng nhập..."</div> }
        >
            {
                let children = children.clone();
                view! {
                    <Show when=signed_in fallback=fallback.clone()>
                        {children()}
                    </Show>
                }
            }
        </Show>
    }
}
