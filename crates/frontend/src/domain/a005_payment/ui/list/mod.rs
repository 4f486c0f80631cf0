use crate::domain::a001_agency::ui::picker::{selected_agency_id, AgencySelect};
use crate::domain::a005_payment::api::{fetch_payments, update_payment_status};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::PAYMENT_NEW;
use crate::shared::components::ui::PaymentStatusBadge;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    filter_list, get_sort_indicator, highlight_matches, sort_list, SearchInput,
};
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_vnd;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a005_payment::{
    Payment, PaymentListQuery, PaymentStatus, UpdatePaymentStatusDto,
};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn replace_payment(rows: &mut [Payment], updated: Payment) {
    if let Some(row) = rows.iter_mut().find(|p| p.payment_id == updated.payment_id) {
        *row = updated;
    }
}

/// Sum of the visible payments, cancelled ones excluded
pub fn collected_total(rows: &[Payment]) -> f64 {
    rows.iter()
        .filter(|p| p.status != PaymentStatus::Cancelled)
        .map(Payment::amount_value)
        .sum()
}

#[component]
#[allow(non_snake_case)]
fn PaymentStatusUpdate(payment: Payment, on_updated: Callback<Payment>) -> impl IntoView {
    let notifications = use_notifications();
    let id = payment.payment_id;
    let code = payment.code();
    let current = payment.status.clone();
    let targets: Vec<PaymentStatus> = PaymentStatus::KNOWN
        .into_iter()
        .filter(|s| *s != current)
        .collect();

    let target = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());
    let is_saving = RwSignal::new(false);

    let apply = move |_| {
        let value = target.get_untracked();
        if value.is_empty() {
            return;
        }
        let reason_text = reason.get_untracked().trim().to_string();
        let dto = UpdatePaymentStatusDto {
            status: PaymentStatus::from(value),
            status_reason: (!reason_text.is_empty()).then_some(reason_text),
        };
        let code = code.clone();
        is_saving.set(true);
        spawn_local(async move {
            match update_payment_status(id, &dto).await {
                Ok(updated) => {
                    log::info!("Payment {} set to {}", code, updated.status.as_str());
                    notifications.success(format!("{}: {}", code, updated.status.label()));
                    target.set(String::new());
                    reason.set(String::new());
                    on_updated.run(updated);
                }
                Err(e) => notifications.error(e.messages().join("; ")),
            }
            is_saving.set(false);
        });
    };

    view! {
        <div class="status-update">
            <Select value=target size=SelectSize::Small>
                <option value="">"-- Đổi trạng thái --"</option>
                {targets.into_iter().map(|s| view! {
                    <option value=s.as_str().to_string()>{s.label()}</option>
                }).collect_view()}
            </Select>
            <Input value=reason placeholder="Lý do" />
            <Button
                size=ButtonSize::Small
                appearance=ButtonAppearance::Primary
                on_click=apply
                disabled=Signal::derive(move || is_saving.get() || target.with(String::is_empty))
            >
                "Lưu"
            </Button>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn PaymentList() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    let (raw_items, set_raw_items) = signal::<Vec<Payment>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let agency = RwSignal::new(String::new());
    let agencies = RwSignal::new(Vec::new());
    let sort_field = RwSignal::new("date".to_string());
    let sort_ascending = RwSignal::new(false);

    let load = move || {
        let query = PaymentListQuery {
            agency_id: selected_agency_id(&agency.get_untracked()),
        };
        spawn_local(async move {
            match fetch_payments(&query).await {
                Ok(rows) => {
                    set_raw_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
        });
    };

    Effect::new(move |_| {
        agency.track();
        load();
    });

    let items = Memo::new(move |_| {
        let mut rows = filter_list(raw_items.get(), &search.get());
        sort_list(&mut rows, &sort_field.get(), sort_ascending.get());
        rows
    });

    let on_updated = Callback::new(move |updated: Payment| {
        set_raw_items.update(|rows| replace_payment(rows, updated));
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|a| *a = !*a);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    };

    let sort_header = move |field: &'static str, title: &'static str| {
        view! {
            <TableHeaderCell>
                <span class="table__sortable" on:click=move |_| toggle_sort(field)>
                    {title}
                    {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                </span>
            </TableHeaderCell>
        }
    };

    view! {
        <PageFrame page_id="a005_payments--list" category="list">
            <PageHeader
                title=Payment::list_name()
                subtitle=Signal::derive(move || Some(format!(
                    "{} phiếu · đã thu {}",
                    items.with(Vec::len),
                    format_vnd(items.with(|rows| collected_total(rows)))
                )))
            >
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Đại lý, người thu, mã phiếu..."
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| tabs_store.open_tab(PAYMENT_NEW, &tab_label_for_key(PAYMENT_NEW))
                >
                    {icon("plus")}
                    " Lập phiếu thu"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                    {icon("refresh")}
                    " Làm mới"
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <div class="filter-bar__item">
                    <label>"Đại lý"</label>
                    <AgencySelect value=agency options=agencies placeholder="Tất cả đại lý" />
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 1000px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Mã phiếu"</TableHeaderCell>
                                {sort_header("date", "Ngày thu")}
                                {sort_header("agency", "Đại lý")}
                                <TableHeaderCell>"Người thu"</TableHeaderCell>
                                {sort_header("amount", "Số tiền")}
                                {sort_header("status", "Trạng thái")}
                                <TableHeaderCell>"Lý do"</TableHeaderCell>
                                <TableHeaderCell>"Thao tác"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let filter = search.get();
                                items.get().into_iter().map(|payment| {
                                    let status = payment.status.clone();
                                    let code_view = highlight_matches(&payment.code(), &filter);
                                    let date = format_date(&payment.payment_date);
                                    let agency_view = highlight_matches(&payment.agency_name, &filter);
                                    let user_view = highlight_matches(&payment.user_name, &filter);
                                    let amount = format_vnd(payment.amount_value());
                                    let reason = payment.status_reason.clone().unwrap_or_else(|| "-".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{code_view}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{date}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{agency_view}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{user_view}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {amount}
                                            </TableCell>
                                            <TableCell>
                                                <PaymentStatusBadge status=status />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {reason}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <PaymentStatusUpdate payment=payment.clone() on_updated=on_updated />
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || items.with(Vec::is_empty) && error.with(Option::is_none)>
                    <div class="table__empty">"Chưa có phiếu thu"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(id: i64, amount: &str, status: PaymentStatus) -> Payment {
        Payment {
            payment_id: id,
            payment_date: "2024-03-10".into(),
            agency_id: 1,
            agency_name: "Đại lý A".into(),
            user_id: Some(2),
            user_name: "Thu ngân".into(),
            amount_collected: amount.into(),
            status,
            status_reason: None,
            created_at: None,
        }
    }

    #[test]
    fn test_collected_total_skips_cancelled() {
        let rows = vec![
            payment(1, "100000.00", PaymentStatus::Completed),
            payment(2, "50000.00", PaymentStatus::Cancelled),
            payment(3, "25000.00", PaymentStatus::Pending),
        ];
        assert_eq!(collected_total(&rows), 125_000.0);
    }

    #[test]
    fn test_replace_payment() {
        let mut rows = vec![payment(1, "10", PaymentStatus::Pending)];
        replace_payment(&mut rows, payment(1, "10", PaymentStatus::Completed));
        assert_eq!(rows[0].status, PaymentStatus::Completed);
    }
}
