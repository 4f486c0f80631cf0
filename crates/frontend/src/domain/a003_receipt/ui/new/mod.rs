use crate::domain::a001_agency::ui::picker::{selected_agency_id, AgencySelect};
use crate::domain::a002_item::ui::{ItemLinesEditor, LineVm};
use crate::domain::a003_receipt::api::create_receipt;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{RECEIPT_DETAIL_PREFIX, RECEIPT_NEW};
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::ui::{ErrorList, FormField};
use crate::shared::components::PageHeader;
use crate::shared::date_utils::today_iso;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a003_receipt::{CreateReceiptDto, CreateReceiptLine, Receipt};
use contracts::domain::common::AggregateRoot;
use contracts::shared::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ReceiptNew() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notifications = use_notifications();

    let agency = RwSignal::new(String::new());
    let agencies = RwSignal::new(Vec::new());
    let receipt_date = RwSignal::new(today_iso());
    let lines = RwSignal::new(vec![LineVm::new(1)]);
    let items = RwSignal::new(Vec::new());

    let field_errors = RwSignal::new(ValidationErrors::new());
    let server_errors = RwSignal::new(Vec::<String>::new());
    let is_saving = RwSignal::new(false);

    let error_for = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|e| e.for_field(field).map(str::to_string)))
    };

    let build_dto = move || CreateReceiptDto {
        agency_id: selected_agency_id(&agency.get_untracked()).unwrap_or(0),
        receipt_date: receipt_date.get_untracked(),
        details: lines.with_untracked(|l| {
            l.iter()
                .map(|line| CreateReceiptLine {
                    item: line.item.with_untracked(|v| v.trim().parse().unwrap_or(0)),
                    quantity: line.quantity.with_untracked(|v| v.trim().parse().unwrap_or(0)),
                })
                .collect()
        }),
    };

    let handle_submit = move |_| {
        if is_saving.get_untracked() {
            return;
        }
        let dto = match build_dto().prepare() {
            Ok(dto) => dto,
            Err(errors) => {
                field_errors.set(errors);
                return;
            }
        };
        field_errors.set(ValidationErrors::new());
        server_errors.set(Vec::new());
        is_saving.set(true);
        spawn_local(async move {
            match create_receipt(&dto).await {
                Ok(receipt) => {
                    log::info!("Receipt {} created", receipt.code());
                    notifications.success(format!("Đã tạo phiếu nhập {}", receipt.code()));
                    tabs_store.replace_tab(
                        RECEIPT_NEW,
                        &detail_key(RECEIPT_DETAIL_PREFIX, receipt.receipt_id),
                        &detail_tab_label(Receipt::element_name(), &receipt.code()),
                    );
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
        <PageFrame page_id="a003_receipt--form" category="form">
            <PageHeader title="Tạo phiếu nhập kho">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| tabs_store.close_tab(RECEIPT_NEW)>
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
                    <FormField label="Ngày nhập" required=true error=error_for("receipt_date")>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || receipt_date.get()
                            on:input=move |ev| receipt_date.set(event_target_value(&ev))
                        />
                    </FormField>
                    <FormField label="Chi tiết hàng nhập" required=true error=error_for("details")>
                        <ItemLinesEditor lines=lines items=items />
                    </FormField>

                    <div class="form__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_submit
                            disabled=Signal::derive(move || is_saving.get())
                        >
                            {icon("save")}
                            {move || if is_saving.get() { " Đang lưu..." } else { " Lưu phiếu nhập" }}
                        </Button>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}
