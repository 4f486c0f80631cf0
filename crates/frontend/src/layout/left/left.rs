use super::sidebar::Sidebar;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn Left() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <div data-zone="left" class="app-sidebar" class:app-sidebar--hidden=move || !ctx.left_open.get()>
            <Sidebar />
        </div>
    }
}
