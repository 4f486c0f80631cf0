use crate::shared::components::pagination_controls::DEFAULT_PAGE_SIZES;
use contracts::domain::common::{total_pages, PageRequest};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug)]
pub struct AgencyListState {
    pub search: RwSignal<String>,
    pub page: RwSignal<usize>,
    pub page_size: RwSignal<usize>,
    pub total_count: RwSignal<usize>,
    pub sort_field: RwSignal<String>,
    pub sort_ascending: RwSignal<bool>,
    pub is_loading: RwSignal<bool>,
}

pub fn create_state() -> AgencyListState {
    AgencyListState {
        search: RwSignal::new(String::new()),
        page: RwSignal::new(0),
        page_size: RwSignal::new(DEFAULT_PAGE_SIZES[0]),
        total_count: RwSignal::new(0),
        sort_field: RwSignal::new("code".to_string()),
        sort_ascending: RwSignal::new(true),
        is_loading: RwSignal::new(false),
    }
}

impl AgencyListState {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count.get(), self.page_size.get())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.get_untracked(), self.page_size.get_untracked())
    }
}
