use crate::shared::icons::icon;
use crate::shared::number_format::{format_int, format_percent, format_vnd};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Money,
    Integer,
    Percent,
}

impl ValueKind {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueKind::Money => format_vnd(value),
            ValueKind::Integer => format_int(value.round() as i64),
            ValueKind::Percent => format_percent(value),
        }
    }
}

/// Visual tone of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardTone {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

impl CardTone {
    fn class(&self) -> &'static str {
        match self {
            CardTone::Neutral => "stat-card",
            CardTone::Good => "stat-card stat-card--success",
            CardTone::Warning => "stat-card stat-card--warning",
            CardTone::Bad => "stat-card stat-card--error",
        }
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] icon_name: String,
    /// None while loading
    #[prop(into)]
    value: Signal<Option<f64>>,
    kind: ValueKind,
    #[prop(into, optional)] tone: Signal<CardTone>,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => kind.format(v),
        None => "—".to_string(),
    };

    view! {
        <div class=move || tone.get().class()>
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {move || subtitle.get().map(|s| view! {
                    <div class="stat-card__subtitle">{s}</div>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_format() {
        assert_eq!(ValueKind::Money.format(1_500_000.0), "1.500.000 ₫");
        assert_eq!(ValueKind::Integer.format(12.4), "12");
        assert_eq!(ValueKind::Percent.format(42.5), "42,5%");
    }
}
