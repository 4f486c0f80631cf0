//! Табы: обёртка страницы, реестр ключ → view и заголовки.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_key, detail_tab_label, parse_detail_key, tab_label_for_key};
