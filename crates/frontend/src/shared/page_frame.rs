//! PageFrame: общий корневой элемент страницы внутри таба.

use super::page_standard::page_class;
use leptos::prelude::*;

/// Sets `id`, the category class and `data-page-category` on the page root.
#[component]
pub fn PageFrame(
    /// `{entity}--{category}`, e.g. `"a004_issues--list"`
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants
    category: &'static str,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let base_class = page_class(category);
    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div id=page_id class=full_class data-page-category=category>
            {children()}
        </div>
    }
}
