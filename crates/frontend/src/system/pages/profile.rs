use crate::domain::a001_agency::api::fetch_agency;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::AGENCY_DETAIL_PREFIX;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::{DebtGauge, PageHeader};
use crate::shared::page_frame::PageFrame;
use crate::system::auth::use_auth;
use contracts::domain::a001_agency::Agency;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-list__row">
            <span class="detail-list__label">{label}</span>
            <span class="detail-list__value">{value}</span>
        </div>
    }
}

/// Read-only card of the signed-in user and the agency mapped to them
#[component]
#[allow(non_snake_case)]
pub fn ProfilePage() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let (auth_state, _) = use_auth();
    let agency = RwSignal::new(None::<Agency>);
    let (error, set_error) = signal(None::<String>);

    // The mapping arrives after login, so follow it rather than read once
    Effect::new(move |_| {
        let Some(id) = auth_state.with(|s| s.agency_id) else {
            agency.set(None);
            return;
        };
        spawn_local(async move {
            match fetch_agency(id).await {
                Ok(a) => {
                    agency.set(Some(a));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
        });
    });

    let open_agency = move |a: &Agency| {
        tabs_store.open_tab(
            &detail_key(AGENCY_DETAIL_PREFIX, a.id),
            &detail_tab_label(Agency::element_name(), &a.name),
        );
    };

    view! {
        <PageFrame page_id="sys_profile--detail" category="detail">
            <PageHeader title="Hồ sơ người dùng" />

            <div class="page__content">
                {move || auth_state.get().user_info.map(|user| view! {
                    <div class="detail-list">
                        {row("Tên đăng nhập", user.username.clone())}
                        {row("Họ tên", user.display_name().to_string())}
                        {row("Email", user.email.clone().unwrap_or_else(|| "-".to_string()))}
                        {row("Vai trò", user.account_role.map(|r| r.label().to_string()).unwrap_or_else(|| "-".to_string()))}
                    </div>
                })}

                <h3>"Đại lý phụ trách"</h3>
                {move || error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}
                {move || match agency.get() {
                    Some(a) => {
                        let for_link = a.clone();
                        view! {
                            <div class="detail-list">
                                <div class="detail-list__row">
                                    <span class="detail-list__label">"Đại lý"</span>
                                    <a
                                        href="#"
                                        class="table__link"
                                        on:click=move |e| {
                                            e.prevent_default();
                                            open_agency(&for_link);
                                        }
                                    >
                                        {format!("{} · {}", a.code, a.name)}
                                    </a>
                                </div>
                                {row("Địa chỉ", a.address.clone())}
                                <DebtGauge debt=a.current_debt_value() limit=a.debt_limit />
                            </div>
                        }
                        .into_any()
                    }
                    None => view! {
                        <p class="form__hint">"Tài khoản chưa được gán cho đại lý nào"</p>
                    }
                    .into_any(),
                }}
            </div>
        </PageFrame>
    }
}
