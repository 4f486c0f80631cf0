use crate::domain::a004_distribution::api::fetch_distribution;
use crate::shared::components::ui::DistributionStatusBadge;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::{format_date, format_opt_datetime};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_int, format_vnd};
use crate::shared::page_frame::PageFrame;
use contracts::domain::a004_distribution::{issue_code, DistributionRequest};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn DistributionDetails(id: i64) -> impl IntoView {
    let (issue, set_issue) = signal::<Option<DistributionRequest>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        spawn_local(async move {
            match fetch_distribution(id).await {
                Ok(i) => {
                    set_issue.set(Some(i));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
        });
    };
    load();

    view! {
        <PageFrame page_id="a004_issues--detail" category="detail">
            <PageHeader
                title=format!("{} {}", DistributionRequest::element_name(), issue_code(id))
                subtitle=Signal::derive(move || issue.with(|i| i.as_ref().map(DistributionRequest::agency_label)))
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
                    {icon("refresh")}
                    " Tải lại"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                {move || issue.get().map(|i| {
                    let lines = i.details().to_vec();
                    let has_lines = !lines.is_empty();
                    view! {
                        <dl class="detail-list">
                            <dt>"Trạng thái"</dt>
                            <dd><DistributionStatusBadge status=i.status /></dd>
                            <dt>"Lý do"</dt>
                            <dd>{i.status_reason.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Ngày xuất"</dt>
                            <dd>{format_date(&i.issue_date)}</dd>
                            <dt>"Người lập"</dt>
                            <dd>{i.user_name.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Tạo lúc"</dt>
                            <dd>{format_opt_datetime(i.created_at.as_deref())}</dd>
                            <dt>"Tổng tiền"</dt>
                            <dd>{format_vnd(i.total_amount)}</dd>
                        </dl>

                        <Show
                            when=move || has_lines
                            fallback=|| view! { <div class="table__empty">"Không có chi tiết hàng hóa"</div> }
                        >
                            {
                                let lines = lines.clone();
                                view! {
                                    <Table attr:style="width: 100%;">
                                        <TableHeader>
                                            <TableRow>
                                                <TableHeaderCell>"Mặt hàng"</TableHeaderCell>
                                                <TableHeaderCell>"Số lượng"</TableHeaderCell>
                                                <TableHeaderCell>"Đơn giá"</TableHeaderCell>
                                                <TableHeaderCell>"Thành tiền"</TableHeaderCell>
                                            </TableRow>
                                        </TableHeader>
                                        <TableBody>
                                            {lines.iter().map(|d| {
                                                let item_name = d.item_name.clone();
                                                let quantity = format_int(d.quantity);
                                                let unit_price = format_vnd(d.unit_price);
                                                let line_total = format_vnd(d.line_total);
                                                view! {
                                                    <TableRow>
                                                        <TableCell>
                                                            <TableCellLayout>{item_name}</TableCellLayout>
                                                        </TableCell>
                                                        <TableCell class="table__cell--number">{quantity}</TableCell>
                                                        <TableCell class="table__cell--number">{unit_price}</TableCell>
                                                        <TableCell class="table__cell--number">{line_total}</TableCell>
                                                    </TableRow>
                                                }
                                            }).collect_view()}
                                        </TableBody>
                                    </Table>
                                }
                            }
                        </Show>
                    }
                })}
            </div>
        </PageFrame>
    }
}
