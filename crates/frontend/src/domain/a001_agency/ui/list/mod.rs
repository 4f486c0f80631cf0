pub mod state;

use self::state::create_state;
use crate::domain::a001_agency::api::fetch_agencies;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::AGENCY_DETAIL_PREFIX;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::components::ui::DebtLevelBadge;
use crate::shared::components::{PageHeader, PaginationControls};
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, sort_list, SearchInput};
use crate::shared::number_format::{format_percent, format_vnd};
use crate::shared::page_frame::PageFrame;
use contracts::domain::a001_agency::{Agency, AgencyListQuery};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn AgencyList() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();
    let state = create_state();
    let (raw_items, set_raw_items) = signal::<Vec<Agency>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        let search = state.search.get_untracked();
        let paging = state.page_request();
        let query = AgencyListQuery {
            limit: Some(paging.limit),
            offset: Some(paging.offset),
            search: (!search.trim().is_empty()).then(|| search.trim().to_string()),
        };
        state.is_loading.set(true);
        spawn_local(async move {
            match fetch_agencies(&query).await {
                Ok(page) => {
                    state.total_count.set(page.count);
                    set_raw_items.set(page.results);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.into())),
            }
            state.is_loading.set(false);
        });
    };

    // Reload whenever search, page or page size change
    Effect::new(move |_| {
        state.search.track();
        state.page.track();
        state.page_size.track();
        load();
    });

    let items = Memo::new(move |_| {
        let mut rows = raw_items.get();
        sort_list(&mut rows, &state.sort_field.get(), state.sort_ascending.get());
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if state.sort_field.get_untracked() == field {
            state.sort_ascending.update(|a| *a = !*a);
        } else {
            state.sort_field.set(field.to_string());
            state.sort_ascending.set(true);
        }
    };

    let sort_header = move |field: &'static str, title: &'static str| {
        view! {
            <TableHeaderCell>
                <span class="table__sortable" on:click=move |_| toggle_sort(field)>
                    {title}
                    {move || get_sort_indicator(&state.sort_field.get(), field, state.sort_ascending.get())}
                </span>
            </TableHeaderCell>
        }
    };

    let open_detail = move |agency: &Agency| {
        tabs_store.open_tab(
            &detail_key(AGENCY_DETAIL_PREFIX, agency.id),
            &detail_tab_label(Agency::element_name(), &agency.name),
        );
    };

    view! {
        <PageFrame page_id="a001_agency--list" category="list">
            <PageHeader
                title=Agency::list_name()
                subtitle=Signal::derive(move || Some(format!("{} đại lý", state.total_count.get())))
            >
                <SearchInput
                    value=state.search
                    on_change=Callback::new(move |value: String| {
                        state.page.set(0);
                        state.search.set(value);
                    })
                    placeholder="Tìm theo mã, tên, quận..."
                />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load()>
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
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                {sort_header("code", "Mã")}
                                {sort_header("name", "Tên đại lý")}
                                {sort_header("district", "Quận")}
                                <TableHeaderCell>"Điện thoại"</TableHeaderCell>
                                {sort_header("debt", "Công nợ")}
                                <TableHeaderCell>"Hạn mức"</TableHeaderCell>
                                {sort_header("ratio", "Tỷ lệ")}
                                <TableHeaderCell>"Trạng thái"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let filter = state.search.get();
                                items.get().into_iter().map(|agency| {
                                    let level = agency.debt_level();
                                    let for_link = agency.clone();
                                    let code_view = highlight_matches(&agency.code, &filter);
                                    let name_view = highlight_matches(&agency.name, &filter);
                                    let district_view = highlight_matches(&agency.district, &filter);
                                    let phone = agency.phone.clone();
                                    let debt = format_vnd(agency.current_debt_value());
                                    let limit = format_vnd(agency.debt_limit);
                                    let ratio = format_percent(agency.debt_ratio());
                                    let active_label = if agency.is_active { "Hoạt động" } else { "Ngừng" };
                                    view! {
                                        <TableRow class:table__row--inactive=!agency.is_active>
                                            <TableCell>
                                                <TableCellLayout>{code_view}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(&for_link);
                                                        }
                                                    >
                                                        {name_view}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{district_view}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{phone}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {debt}
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {limit}
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {ratio}
                                                    " "
                                                    <DebtLevelBadge level=level />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {active_label}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || state.is_loading.get()>
                    <div class="table__loading">"Đang tải..."</div>
                </Show>

                <PaginationControls
                    current_page=state.page
                    total_pages=Signal::derive(move || state.total_pages())
                    total_count=state.total_count
                    page_size=state.page_size
                    on_page_change=Callback::new(move |page| state.page.set(page))
                    on_page_size_change=Callback::new(move |size| {
                        state.page.set(0);
                        state.page_size.set(size);
                    })
                />
            </div>
        </PageFrame>
    }
}
