use crate::domain::a001_agency::ui::picker::{find_selected, selected_agency_id, AgencySelect};
use crate::domain::a002_item::ui::{ItemLinesEditor, LineVm};
use crate::domain::a004_distribution::api::create_distribution;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{ISSUE_DETAIL_PREFIX, ISSUE_NEW};
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::ui::{ErrorList, FormField};
use crate::shared::components::{DebtGauge, PageHeader};
use crate::shared::date_utils::today_iso;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_vnd;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a004_distribution::{
    CreateDistributionDto, DistributionItem, DistributionRequest, MIN_ADDRESS_LEN,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn build_items(lines: &[LineVm]) -> Vec<DistributionItem> {
    lines
        .iter()
        .map(|line| DistributionItem {
            item: line.item.with_untracked(|v| v.trim().parse().unwrap_or(0)),
            quantity: line.quantity.with_untracked(|v| v.trim().parse().unwrap_or(0)),
            unit_price: line
                .unit_price
                .with_untracked(|v| v.trim().parse::<f64>().ok())
                .filter(|p| *p > 0.0),
        })
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn DistributionNew() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notifications = use_notifications();

    let agency = RwSignal::new(String::new());
    let agencies = RwSignal::new(Vec::new());
    let issue_date = RwSignal::new(today_iso());
    let delivery_address = RwSignal::new(String::new());
    let lines = RwSignal::new(vec![LineVm::new(1)]);
    let items = RwSignal::new(Vec::new());

    let field_errors = RwSignal::new(ValidationErrors::new());
    let server_errors = RwSignal::new(Vec::<String>::new());
    let is_saving = RwSignal::new(false);

    let selected = Memo::new(move |_| agencies.with(|list| find_selected(list, &agency.get())));

    // Default the delivery address to the agency's own address
    Effect::new(move |_| {
        if let Some(a) = selected.get() {
            if delivery_address.get_untracked().trim().is_empty() {
                delivery_address.set(a.address);
            }
        }
    });

    let error_for = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|e| e.for_field(field).map(str::to_string)))
    };

    let handle_submit = move |_| {
        if is_saving.get_untracked() {
            return;
        }
        let dto = CreateDistributionDto {
            agency_id: selected_agency_id(&agency.get_untracked()).unwrap_or(0),
            issue_date: Some(issue_date.get_untracked()).filter(|d| !d.is_empty()),
            items: lines.with_untracked(|l| build_items(l)),
            delivery_address: Some(delivery_address.get_untracked().trim().to_string()),
        };
        if let Err(errors) = dto.validate() {
            field_errors.set(errors);
            return;
        }
        field_errors.set(ValidationErrors::new());
        server_errors.set(Vec::new());
        is_saving.set(true);
        spawn_local(async move {
            match create_distribution(&dto).await {
                Ok(issue) => {
                    log::info!("Issue {} created", issue.code());
                    notifications.success(format!("Đã gửi yêu cầu xuất hàng {}", issue.code()));
                    tabs_store.replace_tab(
                        ISSUE_NEW,
                        &detail_key(ISSUE_DETAIL_PREFIX, issue.issue_id),
                        &detail_tab_label(DistributionRequest::element_name(), &issue.code()),
                    );
                }
                Err(e) => {
                    // Stock and debt-limit rejections arrive as structured payloads
                    let messages = e.messages();
                    notifications.error(messages.join("; "));
                    server_errors.set(messages);
                }
            }
            is_saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a004_issues--form" category="form">
            <PageHeader title="Tạo yêu cầu xuất hàng">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| tabs_store.close_tab(ISSUE_NEW)>
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
                        let limit = a.debt_limit;
                        view! {
                            <div class="form__info">
                                <DebtGauge debt=debt limit=limit />
                                <div>"Còn được nợ: " {format_vnd(a.available_credit())}</div>
                            </div>
                        }
                    })}

                    <FormField label="Ngày xuất">
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || issue_date.get()
                            on:input=move |ev| issue_date.set(event_target_value(&ev))
                        />
                    </FormField>
                    <FormField label="Sản phẩm" required=true error=Signal::derive(move || field_errors.with(|e| {
                        e.for_field("items").or_else(|| e.for_field("quantity")).map(str::to_string)
                    }))>
                        <ItemLinesEditor lines=lines items=items />
                    </FormField>
                    <FormField label="Địa chỉ giao hàng" required=true error=error_for("delivery_address")>
                        <Textarea
                            value=delivery_address
                            placeholder=format!("Ít nhất {} ký tự", MIN_ADDRESS_LEN)
                        />
                    </FormField>

                    <div class="form__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=handle_submit
                            disabled=Signal::derive(move || is_saving.get())
                        >
                            {icon("truck")}
                            {move || if is_saving.get() { " Đang gửi..." } else { " Gửi yêu cầu" }}
                        </Button>
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_items_keeps_catalogue_price() {
        let line = LineVm::new(1);
        line.item.set("3".into());
        line.quantity.set("4".into());
        line.unit_price.set("15000".into());
        let blank = LineVm::new(2);
        blank.unit_price.set(String::new());

        let items = build_items(&[line, blank]);
        assert_eq!(items[0].item, 3);
        assert_eq!(items[0].quantity, 4);
        assert_eq!(items[0].unit_price, Some(15000.0));
        assert_eq!(items[1].unit_price, None);
    }
}
