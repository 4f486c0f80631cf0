//! Категории страниц внутри табов.
//!
//! Корневой элемент каждой страницы несёт `id` вида `{entity}--{category}`
//! (например `"a001_agency--list"`) и атрибут `data-page-category`.

/// Таблица записей с фильтрами и пагинацией
pub const PAGE_CAT_LIST: &str = "list";

/// Карточка одной записи
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Форма создания записи
pub const PAGE_CAT_FORM: &str = "form";

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Профиль, экспорт, демо симулятора
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_FORM,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_SYSTEM,
];

/// `{entity}--{category}` with both halves non-empty
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

/// CSS class for the page root
pub fn page_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_FORM => "page page--form",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_agency--list"));
        assert!(is_valid_page_id("d401_debt_report--dashboard"));
        assert!(!is_valid_page_id("a001_agency"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_agency--grid"));
    }

    #[test]
    fn test_page_class() {
        assert_eq!(page_class(PAGE_CAT_LIST), "page");
        assert_eq!(page_class(PAGE_CAT_FORM), "page page--form");
    }
}
