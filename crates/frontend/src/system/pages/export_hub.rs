use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::{ISSUE_NEW, RECEIPT_NEW};
use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a003_receipt::Receipt;
use contracts::domain::a004_distribution::DistributionRequest;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

struct HubCard {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
    list_key: String,
    new_key: &'static str,
}

fn hub_cards() -> Vec<HubCard> {
    vec![
        HubCard {
            icon: "truck",
            title: "Xuất hàng cho đại lý",
            description: "Theo dõi yêu cầu xuất, đổi trạng thái và tạo yêu cầu mới",
            list_key: DistributionRequest::list_tab_key(),
            new_key: ISSUE_NEW,
        },
        HubCard {
            icon: "receipt",
            title: "Nhập hàng vào kho",
            description: "Danh sách phiếu nhập và lập phiếu nhập mới",
            list_key: Receipt::list_tab_key(),
            new_key: RECEIPT_NEW,
        },
    ]
}

/// Entry page of the warehouse section
#[component]
#[allow(non_snake_case)]
pub fn ExportHubPage() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let open = move |key: &str| tabs_store.open_tab(key, &tab_label_for_key(key));

    view! {
        <PageFrame page_id="sys_export_hub--dashboard" category="dashboard">
            <PageHeader title="Xuất nhập hàng" />
            <div class="page__content hub">
                {hub_cards().into_iter().map(|card| {
                    let list_key = card.list_key.clone();
                    let new_key = card.new_key;
                    view! {
                        <div class="hub__card" on:click=move |_| open(&list_key)>
                            <div class="hub__icon">{icon(card.icon)}</div>
                            <div class="hub__title">{card.title}</div>
                            <div class="hub__description">{card.description}</div>
                            <button
                                class="button button--small"
                                on:click=move |e| {
                                    e.stop_propagation();
                                    open(new_key);
                                }
                            >
                                {icon("plus")}
                                " Tạo mới"
                            </button>
                        </div>
                    }
                }).collect_view()}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_cards_point_to_list_tabs() {
        let keys: Vec<String> = hub_cards().into_iter().map(|c| c.list_key).collect();
        assert_eq!(keys, vec!["a004_issues".to_string(), "a003_receipts".to_string()]);
    }
}
