//! Боковое меню: группы разделов, каждый пункт открывает таб.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{
    DEBT_REPORT, EXPORT_HUB, ISSUE_NEW, PAYMENT_NEW, PROFILE, RECEIPT_NEW, SALES_REPORT, SIMULATOR,
};
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use contracts::domain::a001_agency::Agency;
use contracts::domain::a003_receipt::Receipt;
use contracts::domain::a004_distribution::DistributionRequest;
use contracts::domain::a005_payment::Payment;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    key: String,
    label: String,
    icon: &'static str,
}

impl MenuItem {
    fn new(key: impl Into<String>, icon: &'static str) -> Self {
        let key = key.into();
        let label = tab_label_for_key(&key);
        Self { key, label, icon }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<MenuItem>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "overview",
            label: "Tổng quan",
            icon: "home",
            items: vec![MenuItem::new(EXPORT_HUB, "truck"), MenuItem::new(PROFILE, "user")],
        },
        MenuGroup {
            id: "agencies",
            label: "Đại lý",
            icon: "agency",
            items: vec![MenuItem::new(Agency::list_tab_key(), "agency")],
        },
        MenuGroup {
            id: "warehouse",
            label: "Kho hàng",
            icon: "truck",
            items: vec![
                MenuItem::new(Receipt::list_tab_key(), "receipt"),
                MenuItem::new(RECEIPT_NEW, "plus"),
                MenuItem::new(DistributionRequest::list_tab_key(), "truck"),
                MenuItem::new(ISSUE_NEW, "plus"),
                MenuItem::new(SIMULATOR, "clock"),
            ],
        },
        MenuGroup {
            id: "finance",
            label: "Tài chính",
            icon: "wallet",
            items: vec![
                MenuItem::new(Payment::list_tab_key(), "wallet"),
                MenuItem::new(PAYMENT_NEW, "plus"),
            ],
        },
        MenuGroup {
            id: "reports",
            label: "Báo cáo",
            icon: "bar-chart",
            items: vec![
                MenuItem::new(SALES_REPORT, "bar-chart"),
                MenuItem::new(DEBT_REPORT, "alert"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let groups = get_menu_groups();
    let expanded_groups = RwSignal::new(groups.iter().map(|g| g.id).collect::<Vec<_>>());

    view! {
        <nav class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id;
                let items = StoredValue::new(group.items);
                view! {
                    <div class="app-sidebar__group">
                        <div
                            class="app-sidebar__item app-sidebar__item--group"
                            on:click=move |_| {
                                expanded_groups.update(|ids| {
                                    if let Some(pos) = ids.iter().position(|x| *x == group_id) {
                                        ids.remove(pos);
                                    } else {
                                        ids.push(group_id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|item| {
                                    let key = StoredValue::new(item.key);
                                    let label = StoredValue::new(item.label);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key.get_value().as_str())
                                            }
                                            on:click=move |_| ctx.open_tab(&key.get_value(), &label.get_value())
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(item.icon)}
                                                <span>{label.get_value()}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_menu_item_has_a_label() {
        for group in get_menu_groups() {
            for item in group.items {
                assert_ne!(item.label, item.key, "missing label for {}", item.key);
            }
        }
    }
}
