use crate::domain::a001_agency::api::fetch_agency_options;
use contracts::domain::a001_agency::Agency;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Selected agency id parsed from the select value
pub fn selected_agency_id(value: &str) -> Option<i64> {
    value.trim().parse().ok().filter(|id| *id > 0)
}

/// Agency from the loaded options matching the select value
pub fn find_selected(options: &[Agency], value: &str) -> Option<Agency> {
    let id = selected_agency_id(value)?;
    options.iter().find(|a| a.id == id).cloned()
}

/// Выбор агентства; список загружается при монтировании в `options`
#[component]
#[allow(non_snake_case)]
pub fn AgencySelect(
    /// Agency id as a string, empty when nothing is picked
    value: RwSignal<String>,
    options: RwSignal<Vec<Agency>>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let (error, set_error) = signal::<Option<String>>(None);

    if options.with_untracked(Vec::is_empty) {
        spawn_local(async move {
            match fetch_agency_options().await {
                Ok(list) => options.set(list),
                Err(e) => set_error.set(Some(e.into())),
            }
        });
    }

    let placeholder = placeholder.unwrap_or_else(|| "-- Chọn đại lý --".to_string());

    view! {
        <Select value=value>
            <option value="">{placeholder}</option>
            <For
                each=move || options.get()
                key=|a| a.id
                children=move |a: Agency| {
                    view! { <option value=a.id.to_string()>{a.display_label()}</option> }
                }
            />
        </Select>
        {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_agency_id() {
        assert_eq!(selected_agency_id("12"), Some(12));
        assert_eq!(selected_agency_id(""), None);
        assert_eq!(selected_agency_id("0"), None);
        assert_eq!(selected_agency_id("abc"), None);
    }
}
