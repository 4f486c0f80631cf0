use super::tabs::tabs::Tabs;
use leptos::prelude::*;

/// Центральная зона: полоса табов и контент активного таба
#[component]
pub fn Center() -> impl IntoView {
    view! {
        <div data-zone="center" class="app-tabs">
            <Tabs />
        </div>
    }
}
