use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::ui::ErrorList;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage(on_register: Callback<()>) -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(Vec::<String>::new());
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = LoginRequest {
            username: username.get(),
            password: password.get(),
        };
        set_is_loading.set(true);
        set_errors.set(vec![]);

        spawn_local(async move {
            // Success flips the auth state and the router swaps to the shell
            if let Err(messages) = do_login(request, set_auth_state).await {
                set_errors.set(messages);
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Agency"</h1>
                <h2>"Đăng nhập hệ thống"</h2>

                <ErrorList messages=errors />

                <form on:submit=on_submit>
                    <div class="form__group">
                        <label class="form__label" for="username">"Tên đăng nhập"</label>
                        <input
                            type="text"
                            id="username"
                            class="form__input"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form__group">
                        <label class="form__label" for="password">"Mật khẩu"</label>
                        <input
                            type="password"
                            id="password"
                            class="form__input"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button type="submit" class="button button--primary" disabled=move || is_loading.get()>
                        {move || if is_loading.get() { "Đang đăng nhập..." } else { "Đăng nhập" }}
                    </button>
                </form>

                <p class="login-info">
                    "Chưa có tài khoản? "
                    <a href="#" on:click=move |ev| {
                        ev.prevent_default();
                        on_register.run(());
                    }>"Đăng ký"</a>
                </p>
            </div>
        </div>
    }
}
