//! Демонстрация жизненного цикла заявки без бэкенда.
//!
//! Заявки живут только в памяти страницы; каждые `simulator_tick_ms`
//! симулятор переводит не более одной заявки.

use crate::domain::a002_item::ui::{ItemLinesEditor, LineVm};
use crate::shared::components::ui::{DistributionStatusBadge, FormField};
use crate::shared::components::PageHeader;
use crate::shared::config::use_app_config;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::polling::start_polling;
use chrono::{DateTime, Local, Utc};
use contracts::domain::a002_item::Item;
use contracts::domain::a004_distribution::{
    DistributionDraft, DistributionStatus, LocalDistributionRequest, ProductLine, SimulatorConfig,
    StatusSimulator, Transition,
};
use contracts::shared::ValidationErrors;
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

const LOG_LIMIT: usize = 20;

fn short_id(id: Uuid) -> String {
    id.simple().to_string().chars().take(8).collect()
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// "12:00:01 #1a2b3c4d: Đang xử lý → Tạm hoãn (reason)"
pub fn describe_transition(t: &Transition) -> String {
    format!(
        "{} #{}: {} → {} ({})",
        local_time(t.at),
        short_id(t.id),
        t.from.label(),
        t.to.label(),
        t.reason
    )
}

/// Lines with a picked item become draft products; unit comes from the catalogue
pub fn draft_products(lines: &[(i64, i64)], items: &[Item]) -> Vec<ProductLine> {
    lines
        .iter()
        .filter(|(item, _)| *item > 0)
        .map(|(item, quantity)| ProductLine {
            product_id: item.to_string(),
            quantity: u32::try_from(*quantity).unwrap_or(0),
            unit: items
                .iter()
                .find(|i| i.item_id == *item)
                .map(|i| i.unit_name.clone())
                .unwrap_or_default(),
        })
        .collect()
}

fn products_summary(record: &LocalDistributionRequest, items: &[Item]) -> String {
    record
        .products
        .iter()
        .map(|p| {
            let name = p
                .product_id
                .parse::<i64>()
                .ok()
                .and_then(|id| items.iter().find(|i| i.item_id == id))
                .map(|i| i.item_name.clone())
                .unwrap_or_else(|| p.product_id.clone());
            format!("{} × {} {}", name, p.quantity, p.unit)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
#[allow(non_snake_case)]
pub fn DistributionSimulator() -> impl IntoView {
    let config = use_app_config();
    let notifications = use_notifications();

    let simulator = RwSignal::new(StatusSimulator::new(SimulatorConfig::default()));
    let events = RwSignal::new(Vec::<String>::new());
    let running = RwSignal::new(true);

    let lines = RwSignal::new(vec![LineVm::new(1)]);
    let items = RwSignal::new(Vec::<Item>::new());
    let address = RwSignal::new(String::new());
    let field_errors = RwSignal::new(ValidationErrors::new());

    let record_event = move |t: &Transition| {
        let line = describe_transition(t);
        log::info!("Simulator: {}", line);
        events.update(|e| {
            e.insert(0, line);
            e.truncate(LOG_LIMIT);
        });
        let message = format!("#{}: {}", short_id(t.id), t.to.label());
        match t.to {
            DistributionStatus::Confirmed => notifications.success(message),
            DistributionStatus::Cancelled => notifications.error(message),
            _ => notifications.info(message),
        }
    };

    start_polling("simulator", config.simulator_tick_ms, move || async move {
        if !running.get_untracked() {
            return;
        }
        let transition = simulator
            .try_update(|s| s.tick(&mut rand::thread_rng(), Utc::now()))
            .flatten();
        if let Some(t) = transition {
            record_event(&t);
        }
    });

    let submit = move |_| {
        let pairs: Vec<(i64, i64)> = lines.with_untracked(|l| {
            l.iter()
                .map(|line| (line.item.with_untracked(|v| v.parse().unwrap_or(0)), line.quantity.with_untracked(|v| v.parse().unwrap_or(0))))
                .collect()
        });
        let draft = DistributionDraft {
            products: items.with_untracked(|list| draft_products(&pairs, list)),
            delivery_address: address.get_untracked(),
        };
        let outcome = simulator
            .try_update(|s| s.submit(draft, Utc::now()))
            .unwrap_or_else(|| Err(ValidationErrors::new()));
        match outcome {
            Ok(id) => {
                log::info!("Simulator: submitted #{}", short_id(id));
                notifications.success(format!("Đã gửi yêu cầu #{}", short_id(id)));
                field_errors.set(ValidationErrors::new());
                address.set(String::new());
                lines.set(vec![LineVm::new(1)]);
            }
            Err(errors) => field_errors.set(errors),
        }
    };

    let cancel = move |id: Uuid| {
        if let Some(t) = simulator.try_update(|s| s.cancel(id, Utc::now())).flatten() {
            record_event(&t);
        }
    };

    let force_postpone = move |id: Uuid| {
        let armed = simulator
            .try_update(|s| s.set_force_postponed(id))
            .unwrap_or(false);
        if armed {
            notifications.info(format!("#{} sẽ bị tạm hoãn ở lượt tiếp theo", short_id(id)));
        }
    };

    let error_for = move |field: &'static str| {
        Signal::derive(move || field_errors.with(|e| e.for_field(field).map(str::to_string)))
    };

    view! {
        <PageFrame page_id="a004_simulator--dashboard" category="dashboard">
            <PageHeader
                title="Mô phỏng trạng thái yêu cầu xuất hàng"
                subtitle=Signal::derive(move || Some(format!(
                    "Đang chờ: {} · chu kỳ {} ms",
                    simulator.with(StatusSimulator::pending_count),
                    config.simulator_tick_ms
                )))
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| running.update(|r| *r = !*r)
                >
                    {move || if running.get() { icon("pause") } else { icon("play") }}
                    {move || if running.get() { " Tạm dừng" } else { " Tiếp tục" }}
                </Button>
            </PageHeader>

            <div class="page__content simulator">
                <div class="form simulator__form">
                    <FormField label="Sản phẩm" required=true error=Signal::derive(move || field_errors.with(|e| {
                        e.for_field("products").or_else(|| e.for_field("quantity")).map(str::to_string)
                    }))>
                        <ItemLinesEditor lines=lines items=items />
                    </FormField>
                    <FormField label="Địa chỉ giao hàng" required=true error=error_for("delivery_address")>
                        <Textarea value=address placeholder="Ít nhất 10 ký tự" />
                    </FormField>
                    <div class="form__actions">
                        <Button appearance=ButtonAppearance::Primary on_click=submit>
                            {icon("truck")}
                            " Gửi yêu cầu"
                        </Button>
                    </div>
                </div>

                <table class="simulator__table">
                    <thead>
                        <tr>
                            <th>"Mã"</th>
                            <th>"Sản phẩm"</th>
                            <th>"Địa chỉ"</th>
                            <th>"Trạng thái"</th>
                            <th>"Lý do"</th>
                            <th>"Gửi lúc"</th>
                            <th>"Cập nhật"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let catalogue = items.get();
                            simulator.with(|s| s.records().to_vec()).into_iter().map(|r| {
                                let id = r.id;
                                let active = !r.status.is_terminal();
                                let armed = r.force_postponed;
                                let can_postpone = r.status == DistributionStatus::Processing && !armed;
                                view! {
                                    <tr>
                                        <td>{format!("#{}", short_id(id))}</td>
                                        <td>{products_summary(&r, &catalogue)}</td>
                                        <td>{r.delivery_address.clone()}</td>
                                        <td>
                                            <DistributionStatusBadge status=r.status />
                                            {armed.then(|| view! { <span class="badge badge--warning">" ⏸"</span> })}
                                        </td>
                                        <td>{r.status_reason.clone()}</td>
                                        <td>{local_time(r.submitted_at)}</td>
                                        <td>{local_time(r.last_updated_at)}</td>
                                        <td class="simulator__actions">
                                            <Show when=move || can_postpone>
                                                <button
                                                    class="button button--small"
                                                    title="Buộc tạm hoãn ở lượt tiếp theo"
                                                    on:click=move |_| force_postpone(id)
                                                >
                                                    {icon("clock")}
                                                </button>
                                            </Show>
                                            <Show when=move || active>
                                                <button
                                                    class="button button--small button--danger"
                                                    title="Hủy yêu cầu"
                                                    on:click=move |_| cancel(id)
                                                >
                                                    {icon("x")}
                                                </button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>

                <div class="simulator__log">
                    <h3>"Nhật ký chuyển trạng thái"</h3>
                    <ul>
                        {move || events.get().into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                    </ul>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, unit: &str) -> Item {
        Item {
            item_id: id,
            item_name: format!("Sản phẩm {}", id),
            unit: 1,
            unit_name: unit.into(),
            price: "1000".into(),
            stock_quantity: 5,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_draft_products_skips_empty_lines() {
        let items = vec![item(1, "thùng"), item(2, "chai")];
        let products = draft_products(&[(1, 3), (0, 5), (2, -1)], &items);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_id, "1");
        assert_eq!(products[0].unit, "thùng");
        assert_eq!(products[0].quantity, 3);
        // Negative input becomes 0 and is rejected by draft validation
        assert_eq!(products[1].quantity, 0);
    }

    #[test]
    fn test_short_id_is_eight_hex_chars() {
        let id = Uuid::new_v4();
        let short = short_id(id);
        assert_eq!(short.len(), 8);
        assert!(id.simple().to_string().starts_with(&short));
    }

    #[test]
    fn test_describe_transition_mentions_both_states() {
        let t = Transition {
            id: Uuid::nil(),
            from: DistributionStatus::Processing,
            to: DistributionStatus::Postponed,
            reason: "kho thiếu hàng".into(),
            at: Utc::now(),
        };
        let text = describe_transition(&t);
        assert!(text.contains("#00000000"));
        assert!(text.contains("Đang xử lý → Tạm hoãn"));
        assert!(text.contains("kho thiếu hàng"));
    }
}
