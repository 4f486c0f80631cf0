use contracts::domain::a001_agency::DebtLevel;
use contracts::domain::a004_distribution::DistributionStatus;
use contracts::domain::a005_payment::PaymentStatus;
use leptos::prelude::*;

/// Badge with a variant: "primary", "success", "warning", "error", "neutral" (default)
#[component]
pub fn Badge(
    #[prop(optional, into)] variant: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge badge--primary",
        "success" => "badge badge--success",
        "warning" => "badge badge--warning",
        "error" => "badge badge--error",
        _ => "badge badge--neutral",
    };

    view! { <span class=variant_class>{children()}</span> }
}

#[component]
pub fn DebtLevelBadge(#[prop(into)] level: Signal<DebtLevel>) -> impl IntoView {
    view! {
        <span class=move || level.get().css_class()>{move || level.get().label()}</span>
    }
}

#[component]
pub fn DistributionStatusBadge(#[prop(into)] status: Signal<DistributionStatus>) -> impl IntoView {
    view! {
        <span class=move || status.get().css_class()>{move || status.get().label()}</span>
    }
}

#[component]
pub fn PaymentStatusBadge(#[prop(into)] status: Signal<PaymentStatus>) -> impl IntoView {
    view! {
        <span class=move || status.get().css_class()>{move || status.get().label()}</span>
    }
}
