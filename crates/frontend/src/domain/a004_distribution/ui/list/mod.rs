mod status_update;

use self::status_update::StatusUpdate;
use crate::domain::a001_agency::ui::picker::{selected_agency_id, AgencySelect};
use crate::domain::a004_distribution::api::fetch_distributions;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{ISSUE_DETAIL_PREFIX, ISSUE_NEW, SIMULATOR};
use crate::layout::tabs::{detail_key, detail_tab_label, tab_label_for_key};
use crate::shared::components::ui::DistributionStatusBadge;
use crate::shared::components::{PageHeader, PaginationControls};
use crate::shared::config::use_app_config;
use crate::shared::date_utils::{format_date, month_start_iso, today_iso};
use crate::shared::icons::icon;
use crate::shared::number_format::format_vnd;
use crate::shared::page_frame::PageFrame;
use crate::shared::polling::start_polling;
use contracts::domain::a004_distribution::{DistributionListQuery, DistributionRequest};
use contracts::domain::common::{total_pages, AggregateRoot, PageRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const PAGE_SIZE: usize = 50;

/// Agency and date range; a change sends the list back to the first page
type Filters = (Option<i64>, Option<String>, Option<String>);

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn list_query(paging: PageRequest, filters: Filters) -> DistributionListQuery {
    let (agency_id, date_from, date_to) = filters;
    DistributionListQuery {
        limit: Some(paging.limit),
        offset: Some(paging.offset),
        agency_id,
        date_from,
        date_to,
    }
}

fn should_reset_page(previous: Option<&Filters>, current: &Filters, page: usize) -> bool {
    page != 0 && previous.is_some_and(|prev| prev != current)
}

/// Replaces one row in place after a status change
fn replace_row(rows: &mut [DistributionRequest], updated: DistributionRequest) {
    if let Some(row) = rows.iter_mut().find(|r| r.issue_id == updated.issue_id) {
        *row = updated;
    }
}

#[component]
#[allow(non_snake_case)]
pub fn DistributionList() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let config = use_app_config();

    let (rows, set_rows) = signal::<Vec<DistributionRequest>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (last_refresh, set_last_refresh) = signal::<Option<String>>(None);

    let agency = RwSignal::new(String::new());
    let agencies = RwSignal::new(Vec::new());
    let date_from = RwSignal::new(month_start_iso(1));
    let date_to = RwSignal::new(today_iso());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(PAGE_SIZE);
    let total_count = RwSignal::new(0usize);

    let filters = move || -> Filters {
        (
            selected_agency_id(&agency.get_untracked()),
            non_empty(date_from.get_untracked()),
            non_empty(date_to.get_untracked()),
        )
    };
    let query = move || {
        let paging = PageRequest::new(page.get_untracked(), page_size.get_untracked());
        list_query(paging, filters())
    };

    let refresh = move || async move {
        match fetch_distributions(&query()).await {
            Ok(result) => {
                total_count.set(result.count);
                set_rows.set(result.results);
                set_error.set(None);
                set_last_refresh.set(Some(chrono::Local::now().format("%H:%M:%S").to_string()));
            }
            Err(e) => set_error.set(Some(e.into())),
        }
    };

    // Filters apply immediately, starting again from the first page
    Effect::new(move |previous: Option<Filters>| {
        agency.track();
        date_from.track();
        date_to.track();
        page.track();
        page_size.track();
        let current = filters();
        if should_reset_page(previous.as_ref(), &current, page.get_untracked()) {
            page.set(0);
        } else {
            spawn_local(refresh());
        }
        current
    });
    let page_count = Signal::derive(move || total_pages(total_count.get(), page_size.get()));
    start_polling("distributions", config.distribution_poll_ms, refresh);

    let on_updated = Callback::new(move |updated: DistributionRequest| {
        set_rows.update(|rows| replace_row(rows, updated));
    });

    let open_detail = move |id: i64, code: String| {
        tabs_store.open_tab(
            &detail_key(ISSUE_DETAIL_PREFIX, id),
            &detail_tab_label(DistributionRequest::element_name(), &code),
        );
    };

    view! {
        <PageFrame page_id="a004_issues--list" category="list">
            <PageHeader
                title=DistributionRequest::list_name()
                subtitle=Signal::derive(move || last_refresh.get().map(|t| format!("Cập nhật lúc {}", t)))
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| tabs_store.open_tab(ISSUE_NEW, &tab_label_for_key(ISSUE_NEW))
                >
                    {icon("plus")}
                    " Tạo yêu cầu"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| tabs_store.open_tab(SIMULATOR, &tab_label_for_key(SIMULATOR))
                >
                    {icon("play")}
                    " Mô phỏng"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(refresh())>
                    {icon("refresh")}
                    " Làm mới"
                </Button>
            </PageHeader>

            <div class="filter-bar">
                <div class="filter-bar__item">
                    <label>"Đại lý"</label>
                    <AgencySelect value=agency options=agencies placeholder="Tất cả đại lý" />
                </div>
                <div class="filter-bar__item">
                    <label>"Từ ngày"</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || date_from.get()
                        on:change=move |ev| date_from.set(event_target_value(&ev))
                    />
                </div>
                <div class="filter-bar__item">
                    <label>"Đến ngày"</label>
                    <input
                        type="date"
                        class="form__input"
                        prop:value=move || date_to.get()
                        on:change=move |ev| date_to.set(event_target_value(&ev))
                    />
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
                                <TableHeaderCell>"Ngày xuất"</TableHeaderCell>
                                <TableHeaderCell>"Đại lý"</TableHeaderCell>
                                <TableHeaderCell>"Tổng tiền"</TableHeaderCell>
                                <TableHeaderCell>"Trạng thái"</TableHeaderCell>
                                <TableHeaderCell>"Lý do"</TableHeaderCell>
                                <TableHeaderCell>"Cập nhật trạng thái"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || rows.get()
                                key=|r| (r.issue_id, r.status, r.status_reason.clone())
                                children=move |issue: DistributionRequest| {
                                    let id = issue.issue_id;
                                    let code = issue.code();
                                    let code_for_link = code.clone();
                                    let date = format_date(&issue.issue_date);
                                    let agency = issue.agency_label();
                                    let total = format_vnd(issue.total_amount);
                                    let status = issue.status;
                                    let reason = issue.status_reason.clone().unwrap_or_else(|| "-".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id, code_for_link.clone());
                                                        }
                                                    >
                                                        {code}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{date}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{agency}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {total}
                                            </TableCell>
                                            <TableCell>
                                                <DistributionStatusBadge status=status />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {reason}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <StatusUpdate issue=issue.clone() on_updated=on_updated />
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || rows.with(Vec::is_empty) && error.with(Option::is_none)>
                    <div class="table__empty">"Không có yêu cầu xuất hàng trong khoảng thời gian này"</div>
                </Show>

                <PaginationControls
                    current_page=page
                    total_pages=page_count
                    total_count=total_count
                    page_size=page_size
                    on_page_change=Callback::new(move |p| page.set(p))
                    on_page_size_change=Callback::new(move |size| {
                        page.set(0);
                        page_size.set(size);
                    })
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_distribution::DistributionStatus;

    fn issue(id: i64, status: DistributionStatus) -> DistributionRequest {
        DistributionRequest {
            issue_id: id,
            issue_date: "2024-03-01".into(),
            agency_id: 1,
            agency_name: Some("Đại lý A".into()),
            user_id: None,
            user_name: None,
            total_amount: 100_000.0,
            status,
            status_reason: None,
            created_at: None,
            details: None,
        }
    }

    #[test]
    fn test_replace_row_updates_matching_issue() {
        let mut rows = vec![
            issue(1, DistributionStatus::Processing),
            issue(2, DistributionStatus::Processing),
        ];
        replace_row(&mut rows, issue(2, DistributionStatus::Confirmed));
        assert_eq!(rows[0].status, DistributionStatus::Processing);
        assert_eq!(rows[1].status, DistributionStatus::Confirmed);
    }

    #[test]
    fn test_second_page_reaches_rows_past_the_first() {
        let filters: Filters = (Some(3), Some("2024-07-01".into()), None);
        let query = list_query(PageRequest::new(2, PAGE_SIZE), filters);
        assert_eq!(query.limit, Some(50));
        assert_eq!(query.offset, Some(100));
        assert_eq!(query.agency_id, Some(3));
        // 150 issues in range span three pages
        assert_eq!(total_pages(150, PAGE_SIZE), 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let july: Filters = (None, Some("2024-07-01".into()), None);
        let june: Filters = (None, Some("2024-06-01".into()), None);
        assert!(should_reset_page(Some(&july), &june, 2));
        assert!(!should_reset_page(Some(&july), &july, 2));
        assert!(!should_reset_page(Some(&july), &june, 0));
        assert!(!should_reset_page(None, &june, 2));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" 2024-01-01 ".into()), Some("2024-01-01".into()));
    }
}
