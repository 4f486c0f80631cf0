use crate::dashboards::d400_sales_report::api;
use crate::domain::a001_agency::ui::picker::{selected_agency_id, AgencySelect};
use crate::shared::components::{PageHeader, StatCard, ValueKind};
use crate::shared::date_utils::{month_start_iso, today_iso};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_int, format_vnd};
use crate::shared::page_frame::PageFrame;
use contracts::dashboards::d400_sales_report::dto::month_label;
use contracts::dashboards::d400_sales_report::{SalesReportItem, SalesReportQuery, SalesReportSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Default range covers the current month and the five before it
const DEFAULT_MONTHS_BACK: u32 = 5;

/// Bar width in percent of the best month
fn bar_width(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SalesReportDashboard() -> impl IntoView {
    let date_from = RwSignal::new(month_start_iso(DEFAULT_MONTHS_BACK));
    let date_to = RwSignal::new(today_iso());
    let agency = RwSignal::new(String::new());
    let agencies = RwSignal::new(Vec::new());

    let (items, set_items) = signal(Vec::<SalesReportItem>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let summary = Memo::new(move |_| items.with(|rows| SalesReportSummary::from_items(rows)));
    let max_revenue = Memo::new(move |_| {
        items.with(|rows| rows.iter().map(|r| r.total_revenue).fold(0.0, f64::max))
    });

    let load = move || {
        let query = SalesReportQuery {
            from: Some(date_from.get_untracked()).filter(|d| !d.is_empty()),
            to: Some(date_to.get_untracked()).filter(|d| !d.is_empty()),
            agency_id: selected_agency_id(&agency.get_untracked()),
        };
        if let Err(errors) = query.validate() {
            set_error.set(Some(errors.messages().join("; ")));
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_sales_report(&query).await {
                Ok(rows) => {
                    log::debug!("Sales report: {} months", rows.len());
                    set_items.set(rows);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        date_from.track();
        date_to.track();
        agency.track();
        load();
    });

    let stat = move |f: fn(&SalesReportSummary) -> f64| {
        Signal::derive(move || (!items.with(Vec::is_empty)).then(|| summary.with(f)))
    };

    view! {
        <PageFrame page_id="d400_sales_report--dashboard" category="dashboard">
            <PageHeader
                title="Báo cáo doanh số"
                subtitle=Signal::derive(move || {
                    summary.with(|s| s.best_month.as_deref().map(|m| format!("Tháng cao nhất: {}", month_label(m))))
                })
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                    {icon("refresh")}
                    " Làm mới"
                </Button>
            </PageHeader>

            <div class="filter-bar">
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

                <div class="stat-grid">
                    <StatCard label="Doanh thu" icon_name="bar-chart" value=stat(|s| s.total_revenue) kind=ValueKind::Money />
                    <StatCard label="Số phiếu xuất" icon_name="truck" value=stat(|s| s.total_issues as f64) kind=ValueKind::Integer />
                    <StatCard label="Công nợ phát sinh" icon_name="wallet" value=stat(|s| s.total_new_debt) kind=ValueKind::Money />
                    <StatCard label="Trung bình / tháng" icon_name="bar-chart" value=stat(|s| s.average_revenue) kind=ValueKind::Money />
                </div>

                <Show when=move || loading.get()>
                    <div class="table__loading">"Đang tải..."</div>
                </Show>

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Tháng"</TableHeaderCell>
                            <TableHeaderCell>"Doanh thu"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                            <TableHeaderCell>"Số phiếu"</TableHeaderCell>
                            <TableHeaderCell>"Công nợ phát sinh"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let max = max_revenue.get();
                            let best = summary.with(|s| s.best_month.clone());
                            items.get().into_iter().map(|row| {
                                let is_best = best.as_deref() == Some(row.month.as_str());
                                view! {
                                    <TableRow class:report__row--best=is_best>
                                        <TableCell>{month_label(&row.month)}</TableCell>
                                        <TableCell class="table__cell--number">{format_vnd(row.total_revenue)}</TableCell>
                                        <TableCell>
                                            <div class="report__bar">
                                                <div
                                                    class="report__bar-fill"
                                                    style=format!("width: {:.1}%;", bar_width(row.total_revenue, max))
                                                ></div>
                                            </div>
                                        </TableCell>
                                        <TableCell class="table__cell--number">{format_int(row.total_issues)}</TableCell>
                                        <TableCell class="table__cell--number">{format_vnd(row.new_debt_generated)}</TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                        <TableRow class="table__totals-row">
                            <TableCell>"Tổng cộng"</TableCell>
                            <TableCell class="table__cell--number">{move || format_vnd(summary.with(|s| s.total_revenue))}</TableCell>
                            <TableCell>""</TableCell>
                            <TableCell class="table__cell--number">{move || format_int(summary.with(|s| s.total_issues))}</TableCell>
                            <TableCell class="table__cell--number">{move || format_vnd(summary.with(|s| s.total_new_debt))}</TableCell>
                        </TableRow>
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && items.with(Vec::is_empty) && error.with(Option::is_none)>
                    <div class="table__empty">"Không có dữ liệu trong khoảng thời gian đã chọn"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(50.0, 200.0), 25.0);
        assert_eq!(bar_width(10.0, 0.0), 0.0);
        assert_eq!(bar_width(300.0, 200.0), 100.0);
    }
}
