use contracts::shared::validation::ValidationErrors;
use contracts::system::auth::{AccountRole, RegisterForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::components::ui::{ErrorList, FormField};
use crate::shared::notifications::use_notifications;
use crate::system::auth::api;

/// One text input bound to a field of the register form
fn text_input(
    form: RwSignal<RegisterForm>,
    input_type: &'static str,
    get: fn(&RegisterForm) -> String,
    set: fn(&mut RegisterForm, String),
) -> impl IntoView {
    view! {
        <input
            type=input_type
            class="form__input"
            prop:value=move || form.with(get)
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| set(f, value));
            }
        />
    }
}

#[component]
pub fn RegisterPage(on_back: Callback<()>) -> impl IntoView {
    let notifications = use_notifications();
    let form = RwSignal::new(RegisterForm {
        account_role: AccountRole::Staff.as_str().to_string(),
        ..RegisterForm::default()
    });
    let field_errors = RwSignal::new(ValidationErrors::new());
    let server_errors = RwSignal::new(Vec::<String>::new());
    let is_loading = RwSignal::new(false);

    let error_for = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|e| e.for_field(field).map(str::to_string)))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        server_errors.set(vec![]);
        let request = match form.get().validate() {
            Ok(request) => {
                field_errors.set(ValidationErrors::new());
                request
            }
            Err(errors) => {
                field_errors.set(errors);
                return;
            }
        };
        is_loading.set(true);
        spawn_local(async move {
            match api::register(&request).await {
                Ok(()) => {
                    log::info!("Registered {}", request.username);
                    notifications.success("Đăng ký thành công, vui lòng đăng nhập");
                    on_back.run(());
                }
                Err(e) => server_errors.set(e.messages()),
            }
            is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box login-box--wide">
                <h2>"Đăng ký tài khoản"</h2>

                <ErrorList messages=server_errors />

                <form on:submit=on_submit>
                    <FormField label="Họ và tên" required=true error=error_for("full_name")>
                        {text_input(form, "text", |f| f.full_name.clone(), |f, v| f.full_name = v)}
                    </FormField>
                    <FormField label="Tên đăng nhập" required=true error=error_for("username")>
                        {text_input(form, "text", |f| f.username.clone(), |f, v| f.username = v)}
                    </FormField>
                    <FormField label="Email" required=true error=error_for("email")>
                        {text_input(form, "email", |f| f.email.clone(), |f, v| f.email = v)}
                    </FormField>
                    <FormField label="Số điện thoại" required=true error=error_for("phone")>
                        {text_input(form, "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                    </FormField>
                    <FormField label="Địa chỉ" required=true error=error_for("address")>
                        {text_input(form, "text", |f| f.address.clone(), |f, v| f.address = v)}
                    </FormField>
                    <FormField label="Mật khẩu" required=true error=error_for("password")>
                        {text_input(form, "password", |f| f.password.clone(), |f, v| f.password = v)}
                    </FormField>
                    <FormField label="Xác nhận mật khẩu" required=true error=error_for("confirm_password")>
                        {text_input(form, "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
                    </FormField>
                    <FormField label="Vai trò" required=true error=error_for("account_role")>
                        <select
                            class="form__input"
                            prop:value=move || form.with(|f| f.account_role.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.account_role = value);
                            }
                        >
                            {AccountRole::ALL.into_iter().map(|role| view! {
                                <option value=role.as_str()>{role.label()}</option>
                            }).collect_view()}
                        </select>
                    </FormField>

                    <div class="form__actions">
                        <button type="button" class="button button--secondary" on:click=move |_| on_back.run(())>
                            "Quay lại đăng nhập"
                        </button>
                        <button type="submit" class="button button--primary" disabled=move || is_loading.get()>
                            {move || if is_loading.get() { "Đang gửi..." } else { "Đăng ký" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
