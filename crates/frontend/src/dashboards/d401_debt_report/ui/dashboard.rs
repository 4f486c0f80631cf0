use crate::dashboards::d401_debt_report::api;
use crate::domain::a001_agency::ui::picker::{selected_agency_id, AgencySelect};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::AGENCY_DETAIL_PREFIX;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::{CardTone, PageHeader, StatCard, ValueKind};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_percent, format_vnd};
use crate::shared::page_frame::PageFrame;
use contracts::dashboards::d401_debt_report::dto::{combined_buckets, top_debtors};
use contracts::dashboards::d401_debt_report::{AgingBucket, DebtReport, DebtReportQuery};
use contracts::domain::a001_agency::Agency;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const TOP_DEBTORS: usize = 5;

/// Share of overdue debt at which the card turns red
const OVERDUE_ALERT_PERCENT: f64 = 50.0;

fn bucket_class(bucket: AgingBucket) -> &'static str {
    match bucket {
        AgingBucket::Days0To30 => "aging__segment aging__segment--fresh",
        AgingBucket::Days31To60 => "aging__segment aging__segment--warning",
        AgingBucket::Days61To90 => "aging__segment aging__segment--late",
        AgingBucket::Over90 => "aging__segment aging__segment--critical",
    }
}

/// Overdue share of the total in percent
pub fn overdue_percent(overdue: f64, total: f64) -> f64 {
    if total > 0.0 {
        overdue / total * 100.0
    } else {
        0.0
    }
}

fn overdue_tone(percent: f64) -> CardTone {
    if percent >= OVERDUE_ALERT_PERCENT {
        CardTone::Bad
    } else if percent > 0.0 {
        CardTone::Warning
    } else {
        CardTone::Good
    }
}

#[component]
#[allow(non_snake_case)]
fn AgingBar(shares: [(AgingBucket, f64); 4]) -> impl IntoView {
    view! {
        <div class="aging">
            {shares.into_iter().filter(|(_, share)| *share > 0.0).map(|(bucket, share)| view! {
                <div
                    class=bucket_class(bucket)
                    style=format!("width: {:.1}%;", share)
                    title=format!("{}: {}", bucket.label(), format_percent(share))
                ></div>
            }).collect_view()}
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn DebtReportDashboard() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    let agency = RwSignal::new(String::new());
    let agencies = RwSignal::new(Vec::new());
    let (reports, set_reports) = signal(Vec::<DebtReport>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let load = move || {
        let query = DebtReportQuery {
            agency_id: selected_agency_id(&agency.get_untracked()),
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::get_debt_report(&query).await {
                Ok(rows) => {
                    log::debug!("Debt report: {} agencies", rows.len());
                    set_reports.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        agency.track();
        load();
    });

    let combined = Memo::new(move |_| reports.with(|rows| combined_buckets(rows)));
    let total_debt = Memo::new(move |_| reports.with(|rows| rows.iter().map(|r| r.total_debt).sum::<f64>()));
    let overdue = Memo::new(move |_| combined.with(|b| b.overdue()));
    let overdue_share = Signal::derive(move || overdue_percent(overdue.get(), total_debt.get()));
    let top = Memo::new(move |_| reports.with(|rows| top_debtors(rows, TOP_DEBTORS)));

    let has_data = move || !reports.with(Vec::is_empty);
    let when_loaded = move |value: Memo<f64>| Signal::derive(move || has_data().then(|| value.get()));

    let open_agency = move |id: i64, name: String| {
        tabs_store.open_tab(
            &detail_key(AGENCY_DETAIL_PREFIX, id),
            &detail_tab_label(Agency::element_name(), &name),
        );
    };

    let agency_link = move |report: &DebtReport| {
        let id = report.agency_id;
        let name = report.agency_name.clone();
        let label = name.clone();
        view! {
            <a
                href="#"
                class="table__link"
                on:click=move |e| {
                    e.prevent_default();
                    open_agency(id, name.clone());
                }
            >
                {label}
            </a>
        }
    };

    view! {
        <PageFrame page_id="d401_debt_report--dashboard" category="dashboard">
            <PageHeader
                title="Báo cáo tuổi nợ"
                subtitle=Signal::derive(move || Some(format!("{} đại lý có công nợ", reports.with(Vec::len))))
            >
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

                <div class="stat-grid">
                    <StatCard label="Tổng công nợ" icon_name="wallet" value=when_loaded(total_debt) kind=ValueKind::Money />
                    <StatCard
                        label="Quá hạn (> 30 ngày)"
                        icon_name="clock"
                        value=when_loaded(overdue)
                        kind=ValueKind::Money
                        tone=Signal::derive(move || overdue_tone(overdue_share.get()))
                        subtitle=Signal::derive(move || Some(format!("{} tổng nợ", format_percent(overdue_share.get()))))
                    />
                    {AgingBucket::ALL.into_iter().map(|bucket| view! {
                        <StatCard
                            label=bucket.label()
                            icon_name="bar-chart"
                            value=Signal::derive(move || has_data().then(|| combined.with(|b| b.get(bucket))))
                            kind=ValueKind::Money
                            subtitle=Signal::derive(move || {
                                let share = combined.with(|b| b.shares(total_debt.get()))
                                    .into_iter()
                                    .find(|(b, _)| *b == bucket)
                                    .map(|(_, s)| s)
                                    .unwrap_or(0.0);
                                Some(format_percent(share))
                            })
                        />
                    }).collect_view()}
                </div>

                <Show when=move || loading.get()>
                    <div class="table__loading">"Đang tải..."</div>
                </Show>

                <div class="report__section">
                    <h3>"Đại lý nợ nhiều nhất"</h3>
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Đại lý"</TableHeaderCell>
                                <TableHeaderCell>"Tổng nợ"</TableHeaderCell>
                                <TableHeaderCell>"Quá hạn"</TableHeaderCell>
                                <TableHeaderCell>"Cơ cấu"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || top.get().into_iter().map(|report| {
                                let link = agency_link(&report);
                                let total = format_vnd(report.total_debt);
                                let overdue = format_vnd(report.overdue());
                                let shares = report.shares();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{link}</TableCellLayout>
                                        </TableCell>
                                        <TableCell class="table__cell--number">{total}</TableCell>
                                        <TableCell class="table__cell--number">{overdue}</TableCell>
                                        <TableCell>
                                            <AgingBar shares=shares />
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </div>

                <div class="report__section">
                    <h3>"Chi tiết theo đại lý"</h3>
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%; min-width: 900px;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Đại lý"</TableHeaderCell>
                                    {AgingBucket::ALL.into_iter().map(|b| view! {
                                        <TableHeaderCell>{b.label()}</TableHeaderCell>
                                    }).collect_view()}
                                    <TableHeaderCell>"Tổng nợ"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || reports.get().into_iter().map(|report| {
                                    let buckets = report.debt_aging_buckets;
                                    let link = agency_link(&report);
                                    let total = format_vnd(report.total_debt);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{link}</TableCellLayout>
                                            </TableCell>
                                            {AgingBucket::ALL.into_iter().map(|b| view! {
                                                <TableCell
                                                    class={if b.is_overdue() && buckets.get(b) > 0.0 {
                                                        "table__cell--number table__cell--overdue"
                                                    } else {
                                                        "table__cell--number"
                                                    }}
                                                >
                                                    {format_vnd(buckets.get(b))}
                                                </TableCell>
                                            }).collect_view()}
                                            <TableCell class="table__cell--number">{total}</TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()}
                                <TableRow class="table__totals-row">
                                    <TableCell>"Tổng cộng"</TableCell>
                                    {AgingBucket::ALL.into_iter().map(|b| view! {
                                        <TableCell class="table__cell--number">
                                            {move || format_vnd(combined.with(|c| c.get(b)))}
                                        </TableCell>
                                    }).collect_view()}
                                    <TableCell class="table__cell--number">{move || format_vnd(total_debt.get())}</TableCell>
                                </TableRow>
                            </TableBody>
                        </Table>
                    </div>
                </div>

                <Show when=move || !loading.get() && !has_data() && error.with(Option::is_none)>
                    <div class="table__empty">"Không có công nợ"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdue_percent() {
        assert_eq!(overdue_percent(25.0, 100.0), 25.0);
        assert_eq!(overdue_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_overdue_tone_thresholds() {
        assert_eq!(overdue_tone(0.0), CardTone::Good);
        assert_eq!(overdue_tone(12.5), CardTone::Warning);
        assert_eq!(overdue_tone(50.0), CardTone::Bad);
    }
}
