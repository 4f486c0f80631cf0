use crate::layout::global_context::AppGlobalContext;
use crate::routes::AppRoutes;
use crate::shared::config::app_config;
use crate::shared::notifications::{NotificationService, ToastHost};
use crate::system::auth::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = app_config().clone();
    log::info!("API base: {}", config.api_base);
    provide_context(config);
    provide_context(AppGlobalContext::new());
    provide_context(NotificationService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
        <ToastHost />
    }
}
