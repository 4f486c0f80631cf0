//! Заголовки табов и ключи detail-табов.
//!
//! Списки берут `list_name` из `AggregateRoot`, остальное задано здесь.

use contracts::domain::a001_agency::Agency;
use contracts::domain::a003_receipt::{receipt_code, Receipt};
use contracts::domain::a004_distribution::{issue_code, DistributionRequest};
use contracts::domain::a005_payment::Payment;
use contracts::domain::common::AggregateRoot;

pub const AGENCY_DETAIL_PREFIX: &str = "a001_agency_detail_";
pub const RECEIPT_DETAIL_PREFIX: &str = "a003_receipt_detail_";
pub const ISSUE_DETAIL_PREFIX: &str = "a004_issue_detail_";

pub const RECEIPT_NEW: &str = "a003_receipt_new";
pub const ISSUE_NEW: &str = "a004_issue_new";
pub const SIMULATOR: &str = "a004_simulator";
pub const PAYMENT_NEW: &str = "a005_payment_new";
pub const SALES_REPORT: &str = "d400_sales_report";
pub const DEBT_REPORT: &str = "d401_debt_report";
pub const PROFILE: &str = "sys_profile";
pub const EXPORT_HUB: &str = "sys_export_hub";

pub fn detail_key(prefix: &str, id: i64) -> String {
    format!("{}{}", prefix, id)
}

/// Id from a detail key, `None` when the key has another prefix or a bad id
pub fn parse_detail_key(key: &str, prefix: &str) -> Option<i64> {
    key.strip_prefix(prefix)?.parse().ok().filter(|id| *id > 0)
}

/// «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

/// Читаемый заголовок таба; для неизвестного ключа возвращает сам ключ.
pub fn tab_label_for_key(key: &str) -> String {
    if let Some(id) = parse_detail_key(key, AGENCY_DETAIL_PREFIX) {
        return detail_tab_label(Agency::element_name(), &format!("#{}", id));
    }
    if let Some(id) = parse_detail_key(key, RECEIPT_DETAIL_PREFIX) {
        return detail_tab_label(Receipt::element_name(), &receipt_code(id));
    }
    if let Some(id) = parse_detail_key(key, ISSUE_DETAIL_PREFIX) {
        return detail_tab_label(DistributionRequest::element_name(), &issue_code(id));
    }

    let label = match key {
        k if k == Agency::list_tab_key() => Agency::list_name(),
        k if k == Receipt::list_tab_key() => Receipt::list_name(),
        k if k == DistributionRequest::list_tab_key() => DistributionRequest::list_name(),
        k if k == Payment::list_tab_key() => Payment::list_name(),
        RECEIPT_NEW => "Tạo phiếu nhập",
        ISSUE_NEW => "Tạo yêu cầu xuất",
        SIMULATOR => "Mô phỏng trạng thái",
        PAYMENT_NEW => "Lập phiếu thu",
        SALES_REPORT => "Báo cáo doanh số",
        DEBT_REPORT => "Báo cáo công nợ",
        PROFILE => "Hồ sơ",
        EXPORT_HUB => "Xuất hàng",
        _ => return key.to_string(),
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_labels_follow_aggregates() {
        assert_eq!(tab_label_for_key("a001_agency"), "Danh sách đại lý");
        assert_eq!(tab_label_for_key("a004_issues"), "Danh sách xuất hàng");
        assert_eq!(tab_label_for_key("a005_payments"), "Thu tiền công nợ");
    }

    #[test]
    fn test_detail_labels() {
        assert_eq!(tab_label_for_key("a003_receipt_detail_7"), "Phiếu nhập · PX007");
        assert_eq!(tab_label_for_key("a001_agency_detail_12"), "Đại lý · #12");
    }

    #[test]
    fn test_parse_detail_key() {
        assert_eq!(parse_detail_key("a001_agency_detail_5", AGENCY_DETAIL_PREFIX), Some(5));
        assert_eq!(parse_detail_key("a001_agency_detail_x", AGENCY_DETAIL_PREFIX), None);
        assert_eq!(parse_detail_key("a001_agency_detail_0", AGENCY_DETAIL_PREFIX), None);
        assert_eq!(parse_detail_key("a003_receipt_detail_5", AGENCY_DETAIL_PREFIX), None);
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(tab_label_for_key("zzz"), "zzz");
    }
}
