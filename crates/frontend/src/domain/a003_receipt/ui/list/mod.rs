use crate::domain::a003_receipt::api::fetch_receipts;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{RECEIPT_DETAIL_PREFIX, RECEIPT_NEW};
use crate::layout::tabs::{detail_key, detail_tab_label, tab_label_for_key};
use crate::shared::components::{PageHeader, PaginationControls};
use crate::shared::config::use_app_config;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{filter_list, highlight_matches, SearchInput};
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::{format_int, format_vnd};
use crate::shared::page_frame::PageFrame;
use crate::shared::polling::start_polling;
use contracts::domain::a003_receipt::{parse_receipt_code, receipt_code, Receipt, ReceiptListQuery};
use contracts::domain::common::{total_pages, AggregateRoot, PageRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const PAGE_SIZE: usize = 20;

#[component]
#[allow(non_snake_case)]
pub fn ReceiptList() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let notifications = use_notifications();
    let config = use_app_config();

    let (raw_items, set_raw_items) = signal::<Vec<Receipt>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let search = RwSignal::new(String::new());
    let lookup = RwSignal::new(String::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(PAGE_SIZE);
    let total_count = RwSignal::new(0usize);

    let query = move || {
        let paging = PageRequest::new(page.get_untracked(), page_size.get_untracked());
        ReceiptListQuery {
            limit: Some(paging.limit),
            offset: Some(paging.offset),
            agency_id: None,
        }
    };

    let refresh = move || async move {
        match fetch_receipts(&query()).await {
            Ok(result) => {
                total_count.set(result.count);
                set_raw_items.set(result.results);
                set_error.set(None);
            }
            // Keep the previous rows on screen
            Err(e) => set_error.set(Some(e.into())),
        }
    };

    Effect::new(move |_| {
        page.track();
        page_size.track();
        spawn_local(refresh());
    });
    start_polling("receipts", config.receipt_poll_ms, refresh);

    let items = Memo::new(move |_| filter_list(raw_items.get(), &search.get()));

    let open_detail = move |id: i64| {
        tabs_store.open_tab(
            &detail_key(RECEIPT_DETAIL_PREFIX, id),
            &detail_tab_label(Receipt::element_name(), &receipt_code(id)),
        );
    };

    let open_by_code = move || match parse_receipt_code(&lookup.get_untracked()) {
        Some(id) if id > 0 => {
            lookup.set(String::new());
            open_detail(id);
        }
        _ => notifications.error("Mã phiếu không hợp lệ (ví dụ: PX007 hoặc 7)"),
    };

    let page_count = Signal::derive(move || total_pages(total_count.get(), page_size.get()));

    view! {
        <PageFrame page_id="a003_receipt--list" category="list">
            <PageHeader title=Receipt::list_name()>
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Mã phiếu, đại lý, người lập..."
                />
                <div class="lookup-box">
                    <Input value=lookup placeholder="PX007" />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| open_by_code()>
                        "Mở phiếu"
                    </Button>
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| tabs_store.open_tab(RECEIPT_NEW, &tab_label_for_key(RECEIPT_NEW))
                >
                    {icon("plus")}
                    " Tạo phiếu nhập"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| spawn_local(refresh())>
                    {icon("refresh")}
                    " Làm mới"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 800px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Mã phiếu"</TableHeaderCell>
                                <TableHeaderCell>"Ngày nhập"</TableHeaderCell>
                                <TableHeaderCell>"Đại lý"</TableHeaderCell>
                                <TableHeaderCell>"Người lập"</TableHeaderCell>
                                <TableHeaderCell>"Số mặt hàng"</TableHeaderCell>
                                <TableHeaderCell>"Tổng tiền"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let filter = search.get();
                                items.get().into_iter().map(|receipt| {
                                    let id = receipt.receipt_id;
                                    let code = receipt.code();
                                    let code_view = highlight_matches(&code, &filter);
                                    let date = format_date(&receipt.receipt_date);
                                    let agency_view = highlight_matches(&receipt.agency_name, &filter);
                                    let user_view = highlight_matches(&receipt.user_name, &filter);
                                    let item_count = format_int(receipt.item_count() as i64);
                                    let total = format_vnd(receipt.total_amount);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id);
                                                        }
                                                    >
                                                        {code_view}
                                                    </a>
                                                </TableCellLayout>
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
                                                {item_count}
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {total}
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || items.with(Vec::is_empty) && error.with(Option::is_none)>
                    <div class="table__empty">"Chưa có phiếu nhập"</div>
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
