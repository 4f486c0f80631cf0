use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::system::auth::RequireAuth;
use crate::system::pages::{LoginPage, RegisterPage};
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = expect_context::<AppGlobalContext>();

    // Runs once: opens the tab from `?active=` and keeps the URL in sync
    tabs_store.init_router_integration();

    view! { <Shell /> }
}

/// Login and registration share the signed-out screen
#[component]
fn SignedOut() -> impl IntoView {
    let show_register = RwSignal::new(false);

    view! {
        <Show
            when=move || show_register.get()
            fallback=move || view! {
                <LoginPage on_register=Callback::new(move |_| show_register.set(true)) />
            }
        >
            <RegisterPage on_back=Callback::new(move |_| show_register.set(false)) />
        </Show>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <SignedOut /> }>
            <MainLayout />
        </RequireAuth>
    }
}
