use super::view_model::AgencyDetailsVm;
use crate::domain::a001_agency::api::{fetch_agency, update_agency};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::AGENCY_DETAIL_PREFIX;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::ui::{DebtLevelBadge, ErrorList, FormField};
use crate::shared::components::{CardTone, DebtGauge, PageHeader, StatCard, ValueKind};
use crate::shared::date_utils::format_opt_datetime;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a001_agency::{Agency, DebtLevel};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn tone_for(level: DebtLevel) -> CardTone {
    match level {
        DebtLevel::Normal => CardTone::Good,
        DebtLevel::Warning => CardTone::Warning,
        DebtLevel::Critical => CardTone::Bad,
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AgencyDetails(id: i64) -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notifications = use_notifications();
    let vm = AgencyDetailsVm::new();

    let load = move || {
        spawn_local(async move {
            match fetch_agency(id).await {
                Ok(agency) => {
                    tabs_store.update_tab_title(
                        &detail_key(AGENCY_DETAIL_PREFIX, id),
                        &detail_tab_label(Agency::element_name(), &agency.name),
                    );
                    vm.load_error.set(None);
                    vm.fill(agency);
                }
                Err(e) => vm.load_error.set(Some(e.into())),
            }
        });
    };
    load();

    let handle_save = move |_| {
        if vm.is_saving.get_untracked() {
            return;
        }
        let dto = vm.build_dto();
        if let Err(errors) = dto.validate() {
            vm.field_errors.set(errors);
            return;
        }
        vm.field_errors.set(Default::default());
        vm.server_errors.set(Vec::new());
        vm.is_saving.set(true);
        spawn_local(async move {
            match update_agency(id, &dto).await {
                Ok(agency) => {
                    log::info!("Agency {} updated", id);
                    notifications.success(format!("Đã lưu đại lý {}", agency.name));
                    vm.fill(agency);
                }
                Err(e) => {
                    let messages = e.messages();
                    notifications.error(messages.join("; "));
                    vm.server_errors.set(messages);
                }
            }
            vm.is_saving.set(false);
        });
    };

    let debt = Signal::derive(move || vm.agency.with(|a| a.as_ref().map(Agency::current_debt_value).unwrap_or(0.0)));
    let limit = Signal::derive(move || vm.agency.with(|a| a.as_ref().map(|a| a.debt_limit).unwrap_or(0.0)));
    let level = Signal::derive(move || vm.agency.with(|a| a.as_ref().map(Agency::debt_level).unwrap_or(DebtLevel::Normal)));

    let title = move || {
        vm.agency
            .with(|a| a.as_ref().map(|a| format!("{} - {}", a.code, a.name)))
            .unwrap_or_else(|| Agency::element_name().to_string())
    };

    view! {
        <PageFrame page_id="a001_agency--detail" category="detail">
            {move || view! {
                <PageHeader
                    title=title()
                    subtitle=Signal::derive(move || vm.agency.with(|a| a.as_ref().map(|a| a.display_label())))
                >
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                        {icon("refresh")}
                        " Tải lại"
                    </Button>
                </PageHeader>
            }}

            <div class="page__content">
                {move || vm.load_error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <Show when=move || vm.agency.with(Option::is_some)>
                    <div class="stat-grid">
                        <StatCard
                            label="Công nợ hiện tại"
                            icon_name="wallet"
                            value=Signal::derive(move || Some(debt.get()))
                            kind=ValueKind::Money
                            tone=Signal::derive(move || tone_for(level.get()))
                        />
                        <StatCard
                            label="Hạn mức"
                            icon_name="bar-chart"
                            value=Signal::derive(move || Some(limit.get()))
                            kind=ValueKind::Money
                        />
                        <StatCard
                            label="Còn được nợ"
                            icon_name="agency"
                            value=Signal::derive(move || vm.agency.with(|a| a.as_ref().map(Agency::available_credit)))
                            kind=ValueKind::Money
                        />
                    </div>
                    <div class="detail-section">
                        <div class="detail-section__title">
                            "Mức công nợ "
                            <DebtLevelBadge level=level />
                        </div>
                        <DebtGauge debt=debt limit=limit />
                        <div class="detail-section__meta">
                            "Cập nhật: "
                            {move || vm.agency.with(|a| format_opt_datetime(a.as_ref().and_then(|a| a.updated_at.as_deref())))}
                        </div>
                    </div>
                </Show>

                <ErrorList messages=vm.server_errors />

                <div class="form">
                    <FormField label="Tên đại lý" required=true error=vm.error_for("name")>
                        <Input value=vm.name />
                    </FormField>
                    <FormField label="Địa chỉ" required=true error=vm.error_for("address")>
                        <Input value=vm.address />
                    </FormField>
                    <FormField label="Điện thoại" required=true error=vm.error_for("phone")>
                        <Input value=vm.phone />
                    </FormField>
                    <FormField label="Email" error=vm.error_for("email")>
                        <Input value=vm.email />
                    </FormField>
                    <FormField label="Chủ sở hữu">
                        <Input value=vm.owner />
                    </FormField>
                    <FormField label="Mã số thuế" error=vm.error_for("tax_code")>
                        <Input value=vm.tax_code />
                    </FormField>
                    <Checkbox checked=vm.is_active label="Đang hoạt động" />

                    <div class="form__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_save
                            disabled=Signal::derive(move || vm.is_saving.get() || vm.agency.with(Option::is_none))
                        >
                            {icon("save")}
                            {move || if vm.is_saving.get() { " Đang lưu..." } else { " Lưu" }}
                        </Button>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
