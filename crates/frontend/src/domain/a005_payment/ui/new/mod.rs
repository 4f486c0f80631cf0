use crate::domain::a001_agency::ui::picker::{find_selected, selected_agency_id, AgencySelect};
use crate::domain::a005_payment::api::create_payment;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::PAYMENT_NEW;
use crate::shared::components::ui::{ErrorList, FormField};
use crate::shared::components::{DebtGauge, PageHeader};
use crate::shared::date_utils::today_iso;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::{format_vnd, parse_vnd_input};
use crate::shared::page_frame::PageFrame;
use crate::system::auth::use_auth;
use contracts::domain::a005_payment::{projected_debt, CreatePaymentDto, Payment};
use contracts::domain::common::AggregateRoot;
use contracts::shared::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn PaymentNew() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notifications = use_notifications();
    let (auth_state, _) = use_auth();

    // Agency users collect for their own agency
    let initial_agency = auth_state
        .with_untracked(|s| s.agency_id)
        .map(|id| id.to_string())
        .unwrap_or_default();
    let agency = RwSignal::new(initial_agency);
    let agencies = RwSignal::new(Vec::new());
    let amount = RwSignal::new(String::new());
    let payment_date = RwSignal::new(today_iso());

    let field_errors = RwSignal::new(ValidationErrors::new());
    let server_errors = RwSignal::new(Vec::<String>::new());
    let is_saving = RwSignal::new(false);

    let selected = Memo::new(move |_| agencies.with(|list| find_selected(list, &agency.get())));
    let amount_value = Signal::derive(move || amount.with(|a| parse_vnd_input(a).unwrap_or(0.0)));

    let build_dto = move || CreatePaymentDto {
        agency_id: selected_agency_id(&agency.get()).unwrap_or(0),
        amount_collected: amount_value.get(),
        payment_date: payment_date.get(),
        user_id: auth_state.with(|s| s.user_info.as_ref().map(|u| u.id)),
    };

    let warning = Signal::derive(move || {
        let debt = selected.get()?.current_debt_value();
        build_dto().overpayment_warning(debt)
    });

    let error_for = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|e| e.for_field(field).map(str::to_string)))
    };

    let handle_submit = move |_| {
        if is_saving.get_untracked() {
            return;
        }
        let dto = untrack(build_dto);
        if let Err(errors) = dto.validate() {
            field_errors.set(errors);
            return;
        }
        field_errors.set(ValidationErrors::new());
        server_errors.set(Vec::new());
        is_saving.set(true);
        spawn_local(async move {
            match create_payment(&dto).await {
                Ok(payment) => {
                    log::info!("Payment {} created", payment.code());
                    notifications.success(format!(
                        "Đã lập phiếu thu {} ({})",
                        payment.code(),
                        format_vnd(payment.amount_value())
                    ));
                    tabs_store.replace_tab(PAYMENT_NEW, &Payment::list_tab_key(), Payment::list_name());
                }
                Err(e) => {
                    let messages = e.messages();
                    notifications.error(messages.join("; "));
                    server_errors.set(messages);
                }
            }
            is_saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a005_payments--form" category="form">
            <PageHeader title="Lập phiếu thu tiền">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| tabs_store.close_tab(PAYMENT_NEW)>
                    {icon("x")}
                    " Đóng"
                </Button>
            </PageHeader>

            <div class="page__content">
                <ErrorList messages=server_errors />

                <div class="form">
                    <FormField label="Đại lý" required=true error=error_for("agency_id")>
                        <AgencySelect value=agency options=agencies />
                    </FormField>

                    {move || selected.get().map(|a| {
                        let debt = a.current_debt_value();
                        view! {
                            <div class="form__info">
                                <DebtGauge debt=debt limit=a.debt_limit />
                                <div>
                                    "Công nợ sau khi thu: "
                                    <strong>{move || format_vnd(projected_debt(debt, amount_value.get()))}</strong>
                                </div>
                            </div>
                        }
                    })}

                    <FormField label="Số tiền thu" required=true error=error_for("amount_collected")>
                        <Input value=amount placeholder="1.500.000" />
                    </FormField>
                    {move || warning.get().map(|w| view! {
                        <div class="warning-box warning-box--warning">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">{w}</span>
                        </div>
                    })}

                    <FormField label="Ngày thu" required=true error=error_for("payment_date")>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || payment_date.get()
                            on:input=move |ev| payment_date.set(event_target_value(&ev))
                        />
                    </FormField>

                    <div class="form__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_submit
                            disabled=Signal::derive(move || is_saving.get())
                        >
                            {icon("wallet")}
                            {move || if is_saving.get() { " Đang lưu..." } else { " Lưu phiếu thu" }}
                        </Button>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
