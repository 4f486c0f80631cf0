use serde::{Deserialize, Serialize};

/// Страница результатов в формате бэкенда (`count/next/previous/results`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Some list endpoints answer with a bare array instead of a page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Page(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_page(self) -> Paginated<T> {
        match self {
            ListEnvelope::Page(page) => page,
            ListEnvelope::Plain(results) => Paginated {
                count: results.len(),
                next: None,
                previous: None,
                results,
            },
        }
    }
}

/// Параметры limit/offset, общие для всех списков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    /// `page` is 0-indexed
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            limit: page_size,
            offset: page * page_size,
        }
    }
}

/// Number of pages for `count` records, never less than one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 || count == 0 {
        return 1;
    }
    count.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_page() {
        let json = r#"{"count": 3, "next": "http://x/api/v1/agency/?offset=2", "previous": null, "results": [1, 2]}"#;
        let page: Paginated<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 3);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results, vec![1, 2]);
    }

    #[test]
    fn test_missing_links_default_to_none() {
        let page: Paginated<u32> = serde_json::from_str(r#"{"count": 0, "results": []}"#).unwrap();
        assert!(page.next.is_none());
        assert_eq!(total_pages(page.count, 50), 1);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(101, 50), 3);
        assert_eq!(total_pages(100, 50), 2);
        assert_eq!(total_pages(150, 0), 1);
    }

    #[test]
    fn test_bare_array_becomes_single_page() {
        let list: ListEnvelope<u32> = serde_json::from_str("[4, 5, 6]").unwrap();
        let page = list.into_page();
        assert_eq!(page.count, 3);
        assert!(page.next.is_none());

        let list: ListEnvelope<u32> =
            serde_json::from_str(r#"{"count": 10, "next": null, "previous": null, "results": [1]}"#).unwrap();
        assert_eq!(list.into_page().count, 10);
    }

    #[test]
    fn test_page_request_offset() {
        let req = PageRequest::new(2, 25);
        assert_eq!(req.limit, 25);
        assert_eq!(req.offset, 50);
        assert_eq!(PageRequest::new(0, 100).offset, 0);
    }
}
