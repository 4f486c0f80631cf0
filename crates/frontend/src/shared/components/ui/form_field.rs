use leptos::prelude::*;

/// Подпись, поле ввода и сообщение об ошибке под ним
#[component]
pub fn FormField(
    #[prop(into)] label: String,
    /// Inline validation message for this field
    #[prop(optional, into)]
    error: Signal<Option<String>>,
    #[prop(optional)] required: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=move || if error.get().is_some() { "form__group form__group--error" } else { "form__group" }>
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {children()}
            {move || error.get().map(|msg| view! { <div class="form__error">{msg}</div> })}
        </div>
    }
}

/// Список сообщений сервера над формой
#[component]
pub fn ErrorList(#[prop(into)] messages: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <Show when=move || !messages.get().is_empty()>
            <div class="alert alert--error">
                <ul>
                    {move || messages.get().into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                </ul>
            </div>
        </Show>
    }
}
