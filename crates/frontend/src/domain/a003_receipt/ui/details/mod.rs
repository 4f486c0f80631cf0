use crate::domain::a003_receipt::api::fetch_receipt;
use crate::shared::components::PageHeader;
use crate::shared::date_utils::{format_date, format_opt_datetime};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_int, format_vnd};
use crate::shared::page_frame::PageFrame;
use contracts::domain::a003_receipt::{receipt_code, Receipt};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Read-only receipt with its lines
#[component]
#[allow(non_snake_case)]
pub fn ReceiptDetails(id: i64) -> impl IntoView {
    let (receipt, set_receipt) = signal::<Option<Receipt>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        spawn_local(async move {
            match fetch_receipt(id).await {
                Ok(r) => {
                    set_receipt.set(Some(r));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
        });
    };
    load();

    view! {
        <PageFrame page_id="a003_receipt--detail" category="detail">
            <PageHeader
                title=format!("{} {}", Receipt::element_name(), receipt_code(id))
                subtitle=Signal::derive(move || receipt.with(|r| r.as_ref().map(|r| r.agency_name.clone())))
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

                {move || receipt.get().map(|r| {
                    let detail_rows = r.details.iter().enumerate().map(|(i, d)| {
                        let index = i + 1;
                        let item_name = d.item_name.clone();
                        let quantity = format_int(d.quantity);
                        let unit_price = format_vnd(d.unit_price);
                        let line_total = format_vnd(d.line_total);
                        view! {
                            <TableRow>
                                <TableCell>{index}</TableCell>
                                <TableCell>
                                    <TableCellLayout>{item_name}</TableCellLayout>
                                </TableCell>
                                <TableCell class="table__cell--number">{quantity}</TableCell>
                                <TableCell class="table__cell--number">{unit_price}</TableCell>
                                <TableCell class="table__cell--number">{line_total}</TableCell>
                            </TableRow>
                        }
                    }).collect_view();
                    let total_quantity = format_int(r.total_quantity());
                    let total_amount = format_vnd(r.total_amount);
                    view! {
                    <dl class="detail-list">
                        <dt>"Ngày nhập"</dt>
                        <dd>{format_date(&r.receipt_date)}</dd>
                        <dt>"Đại lý"</dt>
                        <dd>{r.agency_name.clone()}</dd>
                        <dt>"Người lập"</dt>
                        <dd>{r.user_name.clone()}</dd>
                        <dt>"Tạo lúc"</dt>
                        <dd>{format_opt_datetime(r.created_at.as_deref())}</dd>
                        <dt>"Tổng số lượng"</dt>
                        <dd>{format_int(r.total_quantity())}</dd>
                    </dl>

                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"#"</TableHeaderCell>
                                <TableHeaderCell>"Mặt hàng"</TableHeaderCell>
                                <TableHeaderCell>"Số lượng"</TableHeaderCell>
                                <TableHeaderCell>"Đơn giá"</TableHeaderCell>
                                <TableHeaderCell>"Thành tiền"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {detail_rows}
                            <TableRow class="table__totals-row">
                                <TableCell>""</TableCell>
                                <TableCell>"Tổng cộng"</TableCell>
                                <TableCell class="table__cell--number">{total_quantity}</TableCell>
                                <TableCell>""</TableCell>
                                <TableCell class="table__cell--number">{total_amount}</TableCell>
                            </TableRow>
                        </TableBody>
                    </Table>
                    }
                })}
            </div>
        </PageFrame>
    }
}
