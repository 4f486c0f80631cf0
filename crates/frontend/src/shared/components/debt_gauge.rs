use contracts::domain::a001_agency::DebtLevel;
use leptos::prelude::*;

use crate::shared::number_format::{format_percent, format_vnd};

/// Width of the filled part, clamped to the bar
pub fn gauge_width(ratio: f64) -> f64 {
    if ratio.is_finite() {
        (ratio * 100.0).clamp(0.0, 100.0)
    } else {
        100.0
    }
}

/// Thanh công nợ so với hạn mức
#[component]
pub fn DebtGauge(
    #[prop(into)] debt: Signal<f64>,
    #[prop(into)] limit: Signal<f64>,
) -> impl IntoView {
    let ratio = move || {
        let limit = limit.get();
        if limit <= 0.0 {
            1.0
        } else {
            debt.get() / limit
        }
    };
    let level = move || DebtLevel::from_ratio(ratio());
    let fill_class = move || match level() {
        DebtLevel::Normal => "debt-gauge__fill debt-gauge__fill--normal",
        DebtLevel::Warning => "debt-gauge__fill debt-gauge__fill--warning",
        DebtLevel::Critical => "debt-gauge__fill debt-gauge__fill--critical",
    };

    view! {
        <div class="debt-gauge">
            <div class="debt-gauge__bar">
                <div class=fill_class style=move || format!("width: {:.1}%;", gauge_width(ratio()))></div>
            </div>
            <div class="debt-gauge__legend">
                <span>{move || format!("{} / {}", format_vnd(debt.get()), format_vnd(limit.get()))}</span>
                <span class=move || level().css_class()>
                    {move || format!("{} · {}", format_percent(ratio() * 100.0), level().label())}
                </span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_width_clamps() {
        assert_eq!(gauge_width(0.5), 50.0);
        assert_eq!(gauge_width(1.7), 100.0);
        assert_eq!(gauge_width(-0.2), 0.0);
        assert_eq!(gauge_width(f64::INFINITY), 100.0);
    }
}
