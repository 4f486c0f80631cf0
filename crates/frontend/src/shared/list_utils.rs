/// Общие утилиты для списков: поиск, сортировка, строка поиска с debounce
use gloo_timers::future::TimeoutFuture;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

use contracts::domain::a001_agency::Agency;
use contracts::domain::a003_receipt::Receipt;
use contracts::domain::a005_payment::Payment;

/// Filters shorter than this are treated as empty
pub const MIN_FILTER_LEN: usize = 2;

const DEBOUNCE_MS: u32 = 300;

/// Строки списка, которые умеют искать сами по себе
pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

impl Searchable for Agency {
    fn matches_filter(&self, filter: &str) -> bool {
        Agency::matches_filter(self, filter)
    }
}

impl Searchable for Payment {
    fn matches_filter(&self, filter: &str) -> bool {
        Payment::matches_filter(self, filter)
    }
}

impl Searchable for Receipt {
    fn matches_filter(&self, filter: &str) -> bool {
        Receipt::matches_filter(self, filter)
    }
}

impl Sortable for Agency {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "district" => self.district.cmp(&other.district),
            "debt" => self
                .current_debt_value()
                .partial_cmp(&other.current_debt_value())
                .unwrap_or(Ordering::Equal),
            "ratio" => self
                .debt_ratio()
                .partial_cmp(&other.debt_ratio())
                .unwrap_or(Ordering::Equal),
            _ => self.code.cmp(&other.code),
        }
    }
}

impl Sortable for Payment {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "agency" => self.agency_name.cmp(&other.agency_name),
            "amount" => self
                .amount_value()
                .partial_cmp(&other.amount_value())
                .unwrap_or(Ordering::Equal),
            "status" => self.status.as_str().cmp(other.status.as_str()),
            _ => self.payment_date.cmp(&other.payment_date),
        }
    }
}

fn is_active_filter(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_FILTER_LEN
}

/// Подсветка совпадений (без учёта регистра)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let needle = filter.trim().to_lowercase();
    let haystack = text.to_lowercase();
    // Byte offsets are only comparable when lowercasing kept the length
    if !is_active_filter(filter) || haystack.len() != text.len() || !haystack.contains(&needle) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    while let Some(pos) = haystack[last..].find(&needle) {
        let start = last + pos;
        let end = start + needle.len();
        if start > last {
            parts.push(view! { <span>{text[last..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-hit">{text[start..end].to_string()}</mark> }.into_any());
        last = end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }
    view! { <>{parts}</> }.into_any()
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !is_active_filter(filter) {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter.trim()))
        .collect()
}

/// Строка поиска: значение уходит наружу через 300 мс после последнего ввода
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Tìm kiếm...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Each keystroke bumps the generation; only the latest one fires
    let generation = StoredValue::new(0u64);

    let handle_input = move |new_value: String| {
        set_input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let current = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(current) {
                on_change.run(new_value);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || if is_active_filter(&value.get()) { "search-input__field search-input__field--active" } else { "search-input__field" }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Xóa">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Обработчик клика по заголовку колонки
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: Signal<String>,
    set_sort_field: WriteSignal<String>,
    set_sort_ascending: WriteSignal<bool>,
) -> impl Fn(MouseEvent) + 'static {
    move |_| {
        if sort_field.get() == field {
            set_sort_ascending.update(|v| *v = !*v);
        } else {
            set_sort_field.set(field.to_string());
            set_sort_ascending.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, i32);

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.0.to_lowercase().contains(&filter.to_lowercase())
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "n" => self.1.cmp(&other.1),
                _ => self.0.cmp(other.0),
            }
        }
    }

    #[test]
    fn test_short_filter_keeps_everything() {
        let rows = vec![Row("Hà Nội", 1), Row("Huế", 2)];
        assert_eq!(filter_list(rows, " h ").len(), 2);
    }

    #[test]
    fn test_filter_matches_case_insensitive() {
        let rows = vec![Row("Hà Nội", 1), Row("Huế", 2), Row("Đà Nẵng", 3)];
        let filtered = filter_list(rows, "HU");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0, "Huế");
    }

    #[test]
    fn test_sort_descending() {
        let mut rows = vec![Row("a", 2), Row("b", 9), Row("c", 5)];
        sort_list(&mut rows, "n", false);
        let order: Vec<i32> = rows.iter().map(|r| r.1).collect();
        assert_eq!(order, vec![9, 5, 2]);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "debt", true), " ⇅");
    }
}
